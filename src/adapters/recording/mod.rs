//! Recording adapters that capture tool interactions to a cassette.

pub mod executor;
pub mod launcher;

use std::sync::{Arc, Mutex};

use crate::cassette::format::{Port, RecordedOutcome};
use crate::cassette::recorder::CassetteRecorder;
use crate::command_line::CommandLine;

pub use executor::RecordingExecutor;
pub use launcher::RecordingLauncher;

/// Append one interaction to the shared recorder.
///
/// A poisoned lock drops the interaction rather than failing the tool call.
pub(crate) fn record_outcome(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: Port,
    command: &CommandLine,
    outcome: RecordedOutcome,
) {
    if let Ok(mut guard) = recorder.lock() {
        guard.record(port, command, outcome);
    } else {
        tracing::warn!(command = %command, "recorder lock poisoned; interaction not recorded");
    }
}
