//! Filesystem port for the checks and writes the builders perform.

use std::path::Path;

/// Provides the filesystem access needed by the command builders.
pub trait FileSystem: Send + Sync {
    /// Returns `true` if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path)
        -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes `contents` to `path`, creating or truncating the file.
    ///
    /// Parent directories are not created.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, missing parent, disk full).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
