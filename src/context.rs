//! Service context bundling the port trait objects and tool settings.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::executor::LiveExecutor;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::launcher::LiveLauncher;
use crate::adapters::recording::{RecordingExecutor, RecordingLauncher};
use crate::adapters::replaying::{ReplayingExecutor, ReplayingLauncher};
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::ToolPaths;
use crate::ports::{BlockingExecutor, DetachedLauncher, FileSystem};

/// Everything the command builders need from the outside world.
///
/// Constructors wire up different adapter sets (live, recording, replaying).
/// No state is shared between operations beyond these handles.
pub struct ServiceContext {
    /// Runs tools to completion.
    pub executor: Box<dyn BlockingExecutor>,
    /// Starts detached processes.
    pub launcher: Box<dyn DetachedLauncher>,
    /// Filesystem checks and writes.
    pub fs: Box<dyn FileSystem>,
    /// Which binaries to invoke.
    pub tools: ToolPaths,
}

impl ServiceContext {
    /// Assembles a context from explicit adapters.
    #[must_use]
    pub fn new(
        executor: Box<dyn BlockingExecutor>,
        launcher: Box<dyn DetachedLauncher>,
        fs: Box<dyn FileSystem>,
        tools: ToolPaths,
    ) -> Self {
        Self { executor, launcher, fs, tools }
    }

    /// Live adapters throughout.
    #[must_use]
    pub fn live(tools: ToolPaths) -> Self {
        Self::new(Box::new(LiveExecutor), Box::new(LiveLauncher), Box::new(LiveFileSystem), tools)
    }

    /// Live adapters whose process interactions are recorded into a cassette
    /// under `dir`. Drop the context before calling
    /// [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the recording session cannot be created.
    pub fn recording_at(dir: &Path, tools: ToolPaths) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(dir)?;
        let ctx = Self::new(
            Box::new(RecordingExecutor::new(Box::new(LiveExecutor), Arc::clone(&session.recorder))),
            Box::new(RecordingLauncher::new(Box::new(LiveLauncher), Arc::clone(&session.recorder))),
            Box::new(LiveFileSystem),
            tools,
        );
        Ok((ctx, session))
    }

    /// Process ports served from the cassette at `path`; the filesystem
    /// stays live.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be read or parsed.
    pub fn replaying(path: &Path, tools: ToolPaths) -> Result<Self, String> {
        let replayer = Arc::new(Mutex::new(CassetteReplayer::load(path)?));
        Ok(Self::new(
            Box::new(ReplayingExecutor::new(Arc::clone(&replayer))),
            Box::new(ReplayingLauncher::new(replayer)),
            Box::new(LiveFileSystem),
            tools,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction, Port, RecordedOutcome};
    use crate::command_line::CommandLine;
    use crate::exec::execute;
    use crate::ports::ProcessOutput;
    use chrono::Utc;

    #[test]
    fn replaying_context_serves_both_ports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.cassette.yaml");
        let ps = CommandLine::new("docker").arg("ps");
        let vm = CommandLine::new("qemu-system-x86_64").flag("-m", "1024");
        let cassette = Cassette {
            name: "t".into(),
            recorded_at: Utc::now(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: Port::Exec,
                    command: ps.to_string(),
                    argv: ps.argv(),
                    outcome: RecordedOutcome::Exited(ProcessOutput {
                        exit_code: 0,
                        stdout: "CONTAINER ID\n".into(),
                        stderr: String::new(),
                    }),
                },
                Interaction {
                    seq: 1,
                    port: Port::Launch,
                    command: vm.to_string(),
                    argv: vm.argv(),
                    outcome: RecordedOutcome::Launched,
                },
            ],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let ctx = ServiceContext::replaying(&path, ToolPaths::default()).unwrap();
        assert_eq!(execute(ctx.executor.as_ref(), &ps).unwrap(), "CONTAINER ID");
        assert!(ctx.launcher.launch(&vm).is_ok());
        assert!(ctx.launcher.launch(&vm).is_err());
    }

    #[test]
    fn replaying_missing_cassette_fails() {
        let result =
            ServiceContext::replaying(Path::new("/nonexistent.yaml"), ToolPaths::default());
        assert!(result.is_err());
    }
}
