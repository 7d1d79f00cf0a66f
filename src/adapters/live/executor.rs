//! Live blocking executor using `std::process::Command`.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::command_line::CommandLine;
use crate::ports::executor::{BlockingExecutor, ProcessOutput};

/// Runs tools directly from their argv, without a shell.
pub struct LiveExecutor;

impl BlockingExecutor for LiveExecutor {
    fn run(
        &self,
        command: &CommandLine,
    ) -> Result<ProcessOutput, Box<dyn std::error::Error + Send + Sync>> {
        debug!(command = %command, "running tool");
        let output = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .output()?;
        let exit_code = output.status.code().unwrap_or(-1);
        debug!(program = command.program(), exit_code, "tool exited");
        Ok(ProcessOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
