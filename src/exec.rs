//! Process outcome normalization.
//!
//! Turns whatever a [`BlockingExecutor`] reports into an [`Outcome`]:
//! exit 0 yields trimmed stdout, a non-zero exit yields the trimmed stderr
//! as an [`Error::Process`], and a spawn failure yields [`Error::Spawn`].

use crate::command_line::CommandLine;
use crate::error::{Error, Outcome};
use crate::ports::{BlockingExecutor, ProcessOutput};

/// Runs `command` to completion and normalizes the result.
///
/// # Errors
///
/// Returns [`Error::Process`] on a non-zero exit and [`Error::Spawn`] if the
/// program could not be started.
pub fn execute(executor: &dyn BlockingExecutor, command: &CommandLine) -> Outcome {
    match executor.run(command) {
        Ok(output) => normalize(output),
        Err(e) => {
            Err(Error::Spawn { program: command.program().to_string(), reason: e.to_string() })
        }
    }
}

fn normalize(output: ProcessOutput) -> Outcome {
    if output.exit_code == 0 {
        Ok(output.stdout.trim().to_string())
    } else {
        Err(Error::Process { code: output.exit_code, stderr: output.stderr.trim().to_string() })
    }
}
