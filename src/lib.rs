//! Core library for the `cloudmgr` CLI.
//!
//! Builds command lines for a hypervisor, its disk image tool and a
//! container engine, runs them through narrow process ports, and normalizes
//! every outcome into a [`CommandResult`].

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod command_line;
pub mod commands;
pub mod config;
pub mod container;
pub mod context;
pub mod error;
pub mod exec;
pub mod ports;
pub mod vm;

#[cfg(test)]
mod test_support;

pub use command_line::CommandLine;
pub use error::{CommandResult, Error, ErrorKind, Outcome, ValidationError};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or the command fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
