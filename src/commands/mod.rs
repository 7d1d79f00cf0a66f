//! Command dispatch and handlers.
//!
//! This is the presentation layer: it gathers inputs, calls the managers and
//! prints the uniform result.

pub mod container;
pub mod dockerfile;
pub mod image;
pub mod vm;

use std::env;
use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::ToolPaths;
use crate::context::ServiceContext;
use crate::error::CommandResult;

/// Environment variable naming a directory to record tool interactions into.
pub const RECORD_ENV: &str = "CLOUDMGR_RECORD";
/// Environment variable naming a cassette to replay tool interactions from.
pub const REPLAY_ENV: &str = "CLOUDMGR_REPLAY";

/// Dispatch a parsed command to its handler.
///
/// With `CLOUDMGR_REPLAY=<file>` tools are not run; their recorded results
/// are served instead. Otherwise, with `CLOUDMGR_RECORD=<dir>` every tool
/// interaction is written to a cassette in that directory.
///
/// # Errors
///
/// Returns the text to show the user when the command fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let tools = ToolPaths::from_env();
    let lookup = |key: &str| env::var(key).ok();

    if let Some(path) = env_path(lookup, REPLAY_ENV) {
        let ctx = ServiceContext::replaying(&path, tools)?;
        return dispatch_with_context(command, &ctx);
    }

    if let Some(dir) = env_path(lookup, RECORD_ENV) {
        let (ctx, session) = ServiceContext::recording_at(&dir, tools)?;
        let result = dispatch_with_context(command, &ctx);
        // Adapters hold the recorder until the context is gone.
        drop(ctx);
        finish_recording(session)?;
        return result;
    }

    dispatch_with_context(command, &ServiceContext::live(tools))
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns the text to show the user when the command fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Vm(cmd) => vm::run(ctx, cmd),
        Command::Image(cmd) => image::run(ctx, cmd),
        Command::Container(cmd) => container::run(ctx, cmd),
        Command::Dockerfile(cmd) => dockerfile::run(ctx, cmd),
    }
}

/// Print a successful result, or turn a failed one into the error text.
pub(crate) fn report(result: CommandResult) -> Result<(), String> {
    if result.succeeded {
        if !result.output.is_empty() {
            println!("{}", result.output);
        }
        Ok(())
    } else {
        Err(format!("Error: {}", result.output))
    }
}

/// Path named by `key`, treating a blank value as unset.
fn env_path(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<PathBuf> {
    lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from)
}

fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let path = session.finish()?;
    eprintln!("Recording saved to: {}", path.display());
    Ok(())
}
