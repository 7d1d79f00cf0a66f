//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use super::format::{Cassette, Port, RecordedOutcome};
use crate::command_line::CommandLine;

/// Replays interactions from a cassette, one queue per port.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<Port, VecDeque<(Vec<String>, RecordedOutcome)>>,
}

impl CassetteReplayer {
    /// Build a replayer over a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<Port, VecDeque<_>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry(interaction.port)
                .or_default()
                .push_back((interaction.argv.clone(), interaction.outcome.clone()));
        }
        Self { queues }
    }

    /// Load a cassette file and build a replayer over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::new(&cassette))
    }

    /// Take the next recorded outcome for `port`, checking it was recorded
    /// for the same argv as `command`.
    ///
    /// # Errors
    ///
    /// Returns an error when the port's interactions are exhausted or the
    /// next one was recorded for a different command.
    pub fn next(&mut self, port: Port, command: &CommandLine) -> Result<RecordedOutcome, String> {
        let queue = self.queues.entry(port).or_default();
        let Some((argv, outcome)) = queue.pop_front() else {
            return Err(format!(
                "Cassette exhausted: no more {port:?} interactions for `{command}`"
            ));
        };
        let requested = command.argv();
        if argv != requested {
            return Err(format!(
                "Cassette mismatch on {port:?}: recorded {argv:?}, requested {requested:?}"
            ));
        }
        Ok(outcome)
    }
}
