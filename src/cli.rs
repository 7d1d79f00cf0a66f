//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `cloudmgr`.
#[derive(Debug, Parser)]
#[command(
    name = "cloudmgr",
    version,
    about = "Launch QEMU virtual machines and drive a container engine"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Virtual machines and disk images.
    #[command(subcommand)]
    Vm(VmCommand),
    /// Container images.
    #[command(subcommand)]
    Image(ImageCommand),
    /// Running containers.
    #[command(subcommand)]
    Container(ContainerCommand),
    /// Dockerfile authoring.
    #[command(subcommand)]
    Dockerfile(DockerfileCommand),
}

/// `cloudmgr vm ...`
#[derive(Debug, Subcommand)]
pub enum VmCommand {
    /// Start a VM in the background.
    Launch {
        /// JSON or YAML file with `cpu`, `ram`, `disk_path`, `iso_path`.
        #[arg(long)]
        config: Option<PathBuf>,
        /// CPU cores (default 2).
        #[arg(long)]
        cpu: Option<String>,
        /// RAM in megabytes (default 2048).
        #[arg(long)]
        ram: Option<String>,
        /// Primary disk image.
        #[arg(long)]
        disk: Option<PathBuf>,
        /// Installation ISO.
        #[arg(long)]
        iso: Option<PathBuf>,
    },
    /// Create a qcow2 disk image.
    CreateDisk {
        /// Size in whole gigabytes.
        #[arg(long, default_value = "10")]
        size: String,
        /// Destination; `.qcow2` is appended unless it ends in `.qcow2` or `.img`.
        dest: PathBuf,
    },
    /// Print the values a configuration file would supply.
    ShowConfig {
        /// Configuration file to read.
        path: PathBuf,
    },
}

/// `cloudmgr image ...`
#[derive(Debug, Subcommand)]
pub enum ImageCommand {
    /// List local images.
    List,
    /// Search the registry.
    Search {
        /// Search term.
        term: String,
    },
    /// Pull an image.
    Pull {
        /// Image name, optionally with a tag.
        name: String,
    },
    /// Build an image from a Dockerfile; its directory is the build context.
    Build {
        /// Path to the Dockerfile.
        dockerfile: PathBuf,
        /// Tag for the built image.
        #[arg(short, long)]
        tag: String,
    },
}

/// `cloudmgr container ...`
#[derive(Debug, Subcommand)]
pub enum ContainerCommand {
    /// List running containers.
    List,
    /// Stop a container, then list the remaining ones.
    Stop {
        /// Container id or name.
        id: String,
    },
}

/// `cloudmgr dockerfile ...`
#[derive(Debug, Subcommand)]
pub enum DockerfileCommand {
    /// Write a Dockerfile to a file or into a directory.
    Write {
        /// Target file, or a directory to write `Dockerfile` into.
        path: PathBuf,
        /// Copy content from this file instead of the starter template.
        #[arg(long)]
        from: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vm_launch_flags() {
        let cli =
            Cli::parse_from(["cloudmgr", "vm", "launch", "--disk", "/vm/a.qcow2", "--cpu", "4"]);
        match cli.command {
            Command::Vm(VmCommand::Launch { disk, cpu, ram, iso, config }) => {
                assert_eq!(disk, Some(PathBuf::from("/vm/a.qcow2")));
                assert_eq!(cpu.as_deref(), Some("4"));
                assert!(ram.is_none() && iso.is_none() && config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn create_disk_defaults_to_ten_gigabytes() {
        let cli = Cli::parse_from(["cloudmgr", "vm", "create-disk", "/vm/new"]);
        assert!(matches!(
            cli.command,
            Command::Vm(VmCommand::CreateDisk { ref size, .. }) if size == "10"
        ));
    }

    #[test]
    fn parses_image_build() {
        let cli = Cli::parse_from(["cloudmgr", "image", "build", "/p/Dockerfile", "-t", "app:1"]);
        assert!(matches!(
            cli.command,
            Command::Image(ImageCommand::Build { ref tag, .. }) if tag == "app:1"
        ));
    }

    #[test]
    fn build_requires_tag_flag() {
        assert!(Cli::try_parse_from(["cloudmgr", "image", "build", "/p/Dockerfile"]).is_err());
    }
}
