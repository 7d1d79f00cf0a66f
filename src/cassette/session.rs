//! Recording session shared by the recording adapters.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Owns the recorder that both process ports write into.
pub struct RecordingSession {
    /// Recorder shared with the recording adapters.
    pub recorder: Arc<Mutex<CassetteRecorder>>,
    path: PathBuf,
}

impl RecordingSession {
    /// Start a session writing `<dir>/<timestamp>.cassette.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the cassette
    /// file already exists.
    pub fn new(dir: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create cassette directory {}: {e}", dir.display()))?;

        let path = dir.join(format!("{timestamp}.cassette.yaml"));
        if path.exists() {
            return Err(format!("Cassette already exists: {}", path.display()));
        }

        let recorder = CassetteRecorder::new(&path, format!("cloudmgr-{timestamp}"));
        Ok(Self { recorder: Arc::new(Mutex::new(recorder)), path })
    }

    /// Where the cassette will be written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the cassette. All adapters holding the recorder must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds the recorder or the file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapters still hold the recorder".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}
