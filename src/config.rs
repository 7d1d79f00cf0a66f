//! VM configuration files and tool settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ports::FileSystem;

/// Environment variable overriding the VM binary.
pub const QEMU_ENV: &str = "CLOUDMGR_QEMU";
/// Environment variable overriding the disk image tool.
pub const QEMU_IMG_ENV: &str = "CLOUDMGR_QEMU_IMG";
/// Environment variable overriding the container engine CLI.
pub const ENGINE_ENV: &str = "CLOUDMGR_ENGINE";

/// A saved VM configuration. Every field is optional and opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmConfig {
    /// CPU core count.
    #[serde(default)]
    pub cpu: Option<String>,
    /// RAM in megabytes.
    #[serde(default)]
    pub ram: Option<String>,
    /// Primary disk image.
    #[serde(default)]
    pub disk_path: Option<String>,
    /// Installation ISO.
    #[serde(default)]
    pub iso_path: Option<String>,
}

impl VmConfig {
    /// Loads a configuration file through `fs`.
    ///
    /// `.yaml` and `.yml` files are parsed as YAML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigLoad`] if the file cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, Error> {
        let load_err = |reason: String| Error::ConfigLoad { path: path.to_path_buf(), reason };

        let contents = fs.read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        if is_yaml {
            serde_yaml::from_str(&contents).map_err(|e| load_err(e.to_string()))
        } else {
            serde_json::from_str(&contents).map_err(|e| load_err(e.to_string()))
        }
    }
}

/// Names (or paths) of the external tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// Hypervisor launcher.
    pub vm_binary: String,
    /// Disk image tool.
    pub img_tool: String,
    /// Container engine CLI.
    pub engine: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            vm_binary: "qemu-system-x86_64".to_string(),
            img_tool: "qemu-img".to_string(),
            engine: "docker".to_string(),
        }
    }
}

impl ToolPaths {
    /// Defaults overridden by any non-empty `CLOUDMGR_*` variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let pick = |key: &str, fallback: String| {
            lookup(key).filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
        };
        Self {
            vm_binary: pick(QEMU_ENV, defaults.vm_binary),
            img_tool: pick(QEMU_IMG_ENV, defaults.img_tool),
            engine: pick(ENGINE_ENV, defaults.engine),
        }
    }
}
