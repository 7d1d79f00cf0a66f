//! `cloudmgr container` commands.

use crate::cli::ContainerCommand;
use crate::container::ContainerManager;
use crate::context::ServiceContext;
use crate::error::CommandResult;

use super::report;

/// Execute a `container` subcommand.
///
/// # Errors
///
/// Returns the text to show the user when the operation fails.
pub fn run(ctx: &ServiceContext, command: &ContainerCommand) -> Result<(), String> {
    let engine = ContainerManager::new(ctx);
    match command {
        ContainerCommand::List => report(CommandResult::from(engine.list_containers())),
        ContainerCommand::Stop { id } => {
            // The list is refreshed whether or not the stop succeeded.
            let stopped = report(CommandResult::from(engine.stop_container(id)));
            let refreshed = report(CommandResult::from(engine.list_containers()));
            stopped.and(refreshed)
        }
    }
}
