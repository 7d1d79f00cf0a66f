//! Accumulates interactions and writes them as a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction, Port, RecordedOutcome};
use crate::command_line::CommandLine;

/// Records tool interactions and writes them as a YAML cassette.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a recorder that will write to `path`.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), interactions: Vec::new() }
    }

    /// Record one invocation. Sequence numbers follow call order.
    pub fn record(&mut self, port: Port, command: &CommandLine, outcome: RecordedOutcome) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port,
            command: command.to_string(),
            argv: command.argv(),
            outcome,
        });
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Write the cassette to disk and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette =
            Cassette { name: self.name, recorded_at: Utc::now(), interactions: self.interactions };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}
