//! Live detached launcher.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::command_line::CommandLine;
use crate::ports::launcher::DetachedLauncher;

/// Spawns processes with their standard streams detached.
///
/// A background thread reaps the child when it exits so long-lived hosts do
/// not accumulate zombies; the caller never waits on it.
pub struct LiveLauncher;

impl DetachedLauncher for LiveLauncher {
    fn launch(
        &self,
        command: &CommandLine,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut child = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        debug!(command = %command, pid = child.id(), "launched detached process");
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}
