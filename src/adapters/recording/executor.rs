//! Recording adapter for the `BlockingExecutor` port.

use std::sync::{Arc, Mutex};

use super::record_outcome;
use crate::cassette::format::{Port, RecordedOutcome};
use crate::cassette::recorder::CassetteRecorder;
use crate::command_line::CommandLine;
use crate::ports::{BlockingExecutor, ProcessOutput};

/// Records every run while delegating to an inner executor.
pub struct RecordingExecutor {
    inner: Box<dyn BlockingExecutor>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingExecutor {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn BlockingExecutor>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl BlockingExecutor for RecordingExecutor {
    fn run(
        &self,
        command: &CommandLine,
    ) -> Result<ProcessOutput, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.run(command);
        let outcome = match &result {
            Ok(output) => RecordedOutcome::Exited(output.clone()),
            Err(e) => RecordedOutcome::SpawnFailed { reason: e.to_string() },
        };
        record_outcome(&self.recorder, Port::Exec, command, outcome);
        result
    }
}
