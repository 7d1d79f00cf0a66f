//! Live adapters for real external interactions.

pub mod executor;
pub mod filesystem;
pub mod launcher;
