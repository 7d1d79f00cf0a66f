//! Replaying adapter for the `DetachedLauncher` port.

use std::sync::{Arc, Mutex};

use crate::cassette::format::{Port, RecordedOutcome};
use crate::cassette::replayer::CassetteReplayer;
use crate::command_line::CommandLine;
use crate::ports::DetachedLauncher;

/// Answers launches from a cassette instead of spawning processes.
pub struct ReplayingLauncher {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingLauncher {
    /// Creates a launcher over a (possibly shared) replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl DetachedLauncher for ReplayingLauncher {
    fn launch(
        &self,
        command: &CommandLine,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let outcome = self
            .replayer
            .lock()
            .map_err(|e| format!("replayer lock poisoned: {e}"))?
            .next(Port::Launch, command)?;
        match outcome {
            RecordedOutcome::Launched => Ok(()),
            RecordedOutcome::SpawnFailed { reason } => Err(reason.into()),
            RecordedOutcome::Exited(_) => {
                Err(format!("recorded a run where a launch of `{command}` was expected").into())
            }
        }
    }
}
