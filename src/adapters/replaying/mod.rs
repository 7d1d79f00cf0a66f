//! Replaying adapters that serve tool interactions from a cassette.

pub mod executor;
pub mod launcher;

pub use executor::ReplayingExecutor;
pub use launcher::ReplayingLauncher;
