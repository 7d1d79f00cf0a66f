//! Recording adapter for the `DetachedLauncher` port.

use std::sync::{Arc, Mutex};

use super::record_outcome;
use crate::cassette::format::{Port, RecordedOutcome};
use crate::cassette::recorder::CassetteRecorder;
use crate::command_line::CommandLine;
use crate::ports::DetachedLauncher;

/// Records every launch while delegating to an inner launcher.
pub struct RecordingLauncher {
    inner: Box<dyn DetachedLauncher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLauncher {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn DetachedLauncher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl DetachedLauncher for RecordingLauncher {
    fn launch(
        &self,
        command: &CommandLine,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.launch(command);
        let outcome = match &result {
            Ok(()) => RecordedOutcome::Launched,
            Err(e) => RecordedOutcome::SpawnFailed { reason: e.to_string() },
        };
        record_outcome(&self.recorder, Port::Launch, command, outcome);
        result
    }
}
