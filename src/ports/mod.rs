//! Port traits defining external boundaries.
//!
//! Each trait is a seam between the command builders and the operating
//! system. Implementations live in `src/adapters/`.

pub mod executor;
pub mod filesystem;
pub mod launcher;

pub use executor::{BlockingExecutor, ProcessOutput};
pub use filesystem::FileSystem;
pub use launcher::DetachedLauncher;
