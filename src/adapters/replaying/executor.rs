//! Replaying adapter for the `BlockingExecutor` port.

use std::sync::{Arc, Mutex};

use crate::cassette::format::{Port, RecordedOutcome};
use crate::cassette::replayer::CassetteReplayer;
use crate::command_line::CommandLine;
use crate::ports::{BlockingExecutor, ProcessOutput};

/// Answers runs from a cassette instead of starting processes.
pub struct ReplayingExecutor {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingExecutor {
    /// Creates an executor over a (possibly shared) replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl BlockingExecutor for ReplayingExecutor {
    fn run(
        &self,
        command: &CommandLine,
    ) -> Result<ProcessOutput, Box<dyn std::error::Error + Send + Sync>> {
        let outcome = self
            .replayer
            .lock()
            .map_err(|e| format!("replayer lock poisoned: {e}"))?
            .next(Port::Exec, command)?;
        match outcome {
            RecordedOutcome::Exited(output) => Ok(output),
            RecordedOutcome::SpawnFailed { reason } => Err(reason.into()),
            RecordedOutcome::Launched => {
                Err(format!("recorded a launch where a run of `{command}` was expected").into())
            }
        }
    }
}
