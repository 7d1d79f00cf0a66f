//! Detached launcher port for fire-and-forget processes.

use crate::command_line::CommandLine;

/// Starts a process without waiting for it.
///
/// Once spawned, the process is on its own: no handle, no output capture,
/// no way to query or cancel it.
pub trait DetachedLauncher: Send + Sync {
    /// Spawns `command` and returns as soon as the OS has started it.
    ///
    /// # Errors
    ///
    /// Returns an error if the process could not be spawned.
    fn launch(&self, command: &CommandLine) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
