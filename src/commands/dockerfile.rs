//! `cloudmgr dockerfile` commands.

use crate::cli::DockerfileCommand;
use crate::container::{ContainerManager, DOCKERFILE_TEMPLATE};
use crate::context::ServiceContext;
use crate::error::CommandResult;

use super::report;

/// Execute a `dockerfile` subcommand.
///
/// # Errors
///
/// Returns the text to show the user when reading the source or writing
/// the Dockerfile fails.
pub fn run(ctx: &ServiceContext, command: &DockerfileCommand) -> Result<(), String> {
    match command {
        DockerfileCommand::Write { path, from } => {
            let content = match from {
                Some(source) => ctx
                    .fs
                    .read_to_string(source)
                    .map_err(|e| format!("Error: failed to read {}: {e}", source.display()))?,
                None => DOCKERFILE_TEMPLATE.to_string(),
            };
            report(CommandResult::from(ContainerManager::new(ctx).write_dockerfile(path, &content)))
        }
    }
}
