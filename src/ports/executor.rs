//! Blocking executor port for running external tools to completion.

use serde::{Deserialize, Serialize};

use crate::command_line::CommandLine;

/// Raw result of a tool that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutput {
    /// Exit code, or -1 when the process was terminated by a signal.
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

/// Runs a command and waits for it to exit.
///
/// The calling thread is blocked until the process terminates; there is no
/// timeout and no cancellation. Callers that must stay responsive run this
/// off their interactive thread.
pub trait BlockingExecutor: Send + Sync {
    /// Runs `command` and captures both output streams.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be started at all.
    /// A non-zero exit is reported through [`ProcessOutput::exit_code`].
    fn run(
        &self,
        command: &CommandLine,
    ) -> Result<ProcessOutput, Box<dyn std::error::Error + Send + Sync>>;
}
