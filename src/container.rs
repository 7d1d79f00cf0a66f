//! Container engine commands and Dockerfile writing.
//!
//! Every engine operation assembles one command line and returns the
//! executor's normalized result as-is; the engine's text is never parsed.

use std::path::{Path, PathBuf};

use crate::command_line::CommandLine;
use crate::context::ServiceContext;
use crate::error::{Error, Outcome, ValidationError};
use crate::exec::execute;

/// Filename used when a Dockerfile is written into a directory.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Starter content offered when the user supplies none.
pub const DOCKERFILE_TEMPLATE: &str =
    "# Write your Dockerfile content here\nFROM python:3.9\nCMD [\"python\", \"--version\"]\n";

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyTerm { field })
    } else {
        Ok(())
    }
}

/// Build context for a Dockerfile: its parent directory, or `.` when the
/// path has no directory component.
#[must_use]
pub fn build_context_dir(dockerfile: &Path) -> PathBuf {
    match dockerfile.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Container engine operations over a [`ServiceContext`].
pub struct ContainerManager<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ContainerManager<'a> {
    /// Creates a manager using the given context.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn engine(&self) -> CommandLine {
        CommandLine::new(&self.ctx.tools.engine)
    }

    fn run(&self, cmd: &CommandLine) -> Outcome {
        execute(self.ctx.executor.as_ref(), cmd)
    }

    /// `<engine> images`
    ///
    /// # Errors
    ///
    /// Returns the engine's failure.
    pub fn list_images(&self) -> Outcome {
        self.run(&self.engine().arg("images"))
    }

    /// `<engine> search <term>`
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTerm`] without running anything for a
    /// blank term, otherwise the engine's failure.
    pub fn search_registry(&self, term: &str) -> Outcome {
        require("search term", term)?;
        self.run(&self.engine().arg("search").arg(term))
    }

    /// `<engine> pull <name>`
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTerm`] for a blank name, otherwise the
    /// engine's failure.
    pub fn pull_image(&self, name: &str) -> Outcome {
        require("image name", name)?;
        self.run(&self.engine().arg("pull").arg(name))
    }

    /// `<engine> build -t <tag> -f "<dockerfile>" "<context>"`
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDockerfile`] if `dockerfile` is not
    /// an existing file, [`ValidationError::EmptyTerm`] for a blank tag,
    /// otherwise the engine's failure.
    pub fn build_image(&self, dockerfile: &Path, tag: &str) -> Outcome {
        if !self.ctx.fs.is_file(dockerfile) {
            return Err(ValidationError::InvalidDockerfile(dockerfile.to_path_buf()).into());
        }
        require("image tag", tag)?;
        let cmd = self
            .engine()
            .arg("build")
            .flag("-t", tag)
            .arg("-f")
            .path(dockerfile)
            .path(&build_context_dir(dockerfile));
        self.run(&cmd)
    }

    /// `<engine> ps`
    ///
    /// # Errors
    ///
    /// Returns the engine's failure.
    pub fn list_containers(&self) -> Outcome {
        self.run(&self.engine().arg("ps"))
    }

    /// `<engine> stop <id>`
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTerm`] for a blank id, otherwise the
    /// engine's failure.
    pub fn stop_container(&self, id: &str) -> Outcome {
        require("container id", id)?;
        self.run(&self.engine().arg("stop").arg(id))
    }

    /// Writes `content` to `path`, or to `path/Dockerfile` when `path` is a
    /// directory. Existing files are overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the file cannot be written.
    pub fn write_dockerfile(&self, path: &Path, content: &str) -> Outcome {
        let target =
            if self.ctx.fs.is_dir(path) { path.join(DOCKERFILE_NAME) } else { path.to_path_buf() };
        self.ctx
            .fs
            .write(&target, content)
            .map_err(|e| Error::Write { path: target.clone(), reason: e.to_string() })?;
        Ok(format!("Dockerfile saved to {}", target.display()))
    }
}
