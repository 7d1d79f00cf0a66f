//! `cloudmgr image` commands.

use crate::cli::ImageCommand;
use crate::container::ContainerManager;
use crate::context::ServiceContext;
use crate::error::CommandResult;

use super::report;

/// Execute an `image` subcommand.
///
/// # Errors
///
/// Returns the text to show the user when the operation fails.
pub fn run(ctx: &ServiceContext, command: &ImageCommand) -> Result<(), String> {
    let engine = ContainerManager::new(ctx);
    let outcome = match command {
        ImageCommand::List => engine.list_images(),
        ImageCommand::Search { term } => engine.search_registry(term),
        ImageCommand::Pull { name } => {
            eprintln!("Pulling {name}...");
            engine.pull_image(name)
        }
        ImageCommand::Build { dockerfile, tag } => {
            eprintln!("Building {tag}...");
            engine.build_image(dockerfile, tag)
        }
    };
    report(CommandResult::from(outcome))
}
