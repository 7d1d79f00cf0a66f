//! `cloudmgr vm` commands.

use std::path::Path;

use crate::cli::VmCommand;
use crate::config::VmConfig;
use crate::context::ServiceContext;
use crate::error::CommandResult;
use crate::vm::{DiskCreateSpec, VmLaunchSpec, VmManager};

use super::report;

/// CPU cores used when neither a flag nor the config gives one.
pub const DEFAULT_CPU: &str = "2";
/// RAM (MB) used when neither a flag nor the config gives one.
pub const DEFAULT_RAM_MB: &str = "2048";

/// Execute a `vm` subcommand.
///
/// # Errors
///
/// Returns the text to show the user when the operation fails.
pub fn run(ctx: &ServiceContext, command: &VmCommand) -> Result<(), String> {
    let vms = VmManager::new(ctx);
    match command {
        VmCommand::Launch { config, cpu, ram, disk, iso } => {
            let config = match config {
                Some(path) => vms.load_config(path).map_err(|e| format!("Error: {e}"))?,
                None => VmConfig::default(),
            };
            let mut spec = VmLaunchSpec::from_config(&config);
            spec.cpu_cores = pick(cpu.as_deref(), config.cpu.as_deref(), DEFAULT_CPU);
            spec.ram_mb = pick(ram.as_deref(), config.ram.as_deref(), DEFAULT_RAM_MB);
            if let Some(disk) = disk {
                spec.disk_path.clone_from(disk);
            }
            if let Some(iso) = iso {
                spec.iso_path = Some(iso.clone());
            }
            report(CommandResult::from(vms.launch(&spec)))
        }
        VmCommand::CreateDisk { size, dest } => {
            let spec = DiskCreateSpec { size_gb: size.clone(), destination: dest.clone() };
            let result = CommandResult::from(vms.create_disk(&spec));
            if result.succeeded {
                println!("Disk created successfully");
            }
            report(result)
        }
        VmCommand::ShowConfig { path } => show_config(&vms, path),
    }
}

/// Flag over config over default.
fn pick(flag: Option<&str>, config: Option<&str>, default: &str) -> String {
    flag.or(config).unwrap_or(default).to_string()
}

fn show_config(vms: &VmManager<'_>, path: &Path) -> Result<(), String> {
    let config = vms.load_config(path).map_err(|e| format!("Error: {e}"))?;
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "(unset)".to_string());
    println!("cpu:       {}", show(&config.cpu));
    println!("ram:       {}", show(&config.ram));
    println!("disk_path: {}", show(&config.disk_path));
    println!("iso_path:  {}", show(&config.iso_path));
    Ok(())
}
