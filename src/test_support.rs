//! Fakes shared by unit tests.

use std::sync::Mutex;

use crate::command_line::CommandLine;
use crate::config::ToolPaths;
use crate::context::ServiceContext;
use crate::ports::{BlockingExecutor, DetachedLauncher, ProcessOutput};

type Reply = Result<ProcessOutput, String>;

/// Executor that answers every call with the same scripted reply and
/// remembers what it was asked to run.
pub struct FakeExecutor {
    reply: Reply,
    calls: Mutex<Vec<CommandLine>>,
}

impl FakeExecutor {
    pub fn exiting(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            reply: Ok(ProcessOutput {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(stdout: &str) -> Self {
        Self::exiting(0, stdout, "")
    }

    pub fn failing_to_spawn(reason: &str) -> Self {
        Self { reply: Err(reason.to_string()), calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.lock().unwrap().clone()
    }
}

impl BlockingExecutor for FakeExecutor {
    fn run(
        &self,
        command: &CommandLine,
    ) -> Result<ProcessOutput, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.lock().unwrap().push(command.clone());
        self.reply.clone().map_err(Into::into)
    }
}

impl BlockingExecutor for std::sync::Arc<FakeExecutor> {
    fn run(
        &self,
        command: &CommandLine,
    ) -> Result<ProcessOutput, Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().run(command)
    }
}

/// Launcher that counts spawns instead of starting anything.
#[derive(Default)]
pub struct CountingLauncher {
    fail_with: Option<String>,
    launched: Mutex<Vec<CommandLine>>,
}

impl CountingLauncher {
    pub fn failing(reason: &str) -> Self {
        Self { fail_with: Some(reason.to_string()), launched: Mutex::new(Vec::new()) }
    }

    pub fn launched(&self) -> Vec<CommandLine> {
        self.launched.lock().unwrap().clone()
    }
}

impl DetachedLauncher for CountingLauncher {
    fn launch(
        &self,
        command: &CommandLine,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.launched.lock().unwrap().push(command.clone());
        match &self.fail_with {
            Some(reason) => Err(reason.clone().into()),
            None => Ok(()),
        }
    }
}

impl DetachedLauncher for std::sync::Arc<CountingLauncher> {
    fn launch(
        &self,
        command: &CommandLine,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().launch(command)
    }
}

/// Context over the given fakes, the live filesystem and default tool names.
pub fn fake_context(
    executor: &std::sync::Arc<FakeExecutor>,
    launcher: &std::sync::Arc<CountingLauncher>,
) -> ServiceContext {
    use crate::adapters::live::filesystem::LiveFileSystem;

    ServiceContext::new(
        Box::new(std::sync::Arc::clone(executor)),
        Box::new(std::sync::Arc::clone(launcher)),
        Box::new(LiveFileSystem),
        ToolPaths::default(),
    )
}
