//! Virtual machine launch and disk image creation.

use std::path::{Path, PathBuf};

use crate::command_line::CommandLine;
use crate::config::{ToolPaths, VmConfig};
use crate::context::ServiceContext;
use crate::error::{Error, Outcome, ValidationError};
use crate::exec::execute;
use crate::ports::FileSystem;

/// Extensions accepted as disk images.
pub const DISK_EXTENSIONS: [&str; 2] = ["qcow2", "img"];
/// Extension appended when a destination has none of [`DISK_EXTENSIONS`].
pub const DEFAULT_DISK_EXTENSION: &str = "qcow2";
/// Image format passed to the disk tool.
pub const DISK_FORMAT: &str = "qcow2";

/// Inputs for starting a VM, as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmLaunchSpec {
    /// CPU cores; empty leaves the hypervisor default.
    pub cpu_cores: String,
    /// RAM in megabytes; empty leaves the hypervisor default.
    pub ram_mb: String,
    /// Primary disk image. Must exist.
    pub disk_path: PathBuf,
    /// Optional installation ISO. Must exist when given.
    pub iso_path: Option<PathBuf>,
}

impl VmLaunchSpec {
    /// Copies a configuration record verbatim; missing fields stay empty.
    #[must_use]
    pub fn from_config(config: &VmConfig) -> Self {
        Self {
            cpu_cores: config.cpu.clone().unwrap_or_default(),
            ram_mb: config.ram.clone().unwrap_or_default(),
            disk_path: config.disk_path.clone().map(PathBuf::from).unwrap_or_default(),
            iso_path: config.iso_path.clone().filter(|p| !p.is_empty()).map(PathBuf::from),
        }
    }

    fn requested_iso(&self) -> Option<&Path> {
        self.iso_path.as_deref().filter(|p| !p.as_os_str().is_empty())
    }
}

/// Inputs for creating a disk image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskCreateSpec {
    /// Size in whole gigabytes.
    pub size_gb: String,
    /// Where to create the image; the default extension is added if needed.
    pub destination: PathBuf,
}

/// Appends [`DEFAULT_DISK_EXTENSION`] unless `path` already carries one of
/// [`DISK_EXTENSIONS`]. Applying it twice changes nothing.
#[must_use]
pub fn normalize_disk_path(path: &Path) -> PathBuf {
    let recognized = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DISK_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(e)));
    if recognized {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(DEFAULT_DISK_EXTENSION);
    PathBuf::from(name)
}

/// Parses an optional positive count. Blank input means "not given".
fn parse_optional_count(field: &'static str, value: &str) -> Result<Option<u64>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u64>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ValidationError::InvalidNumber { field, value: value.to_string() }),
    }
}

/// Validates `spec` and assembles the hypervisor command line.
///
/// Checks run in order: disk, ISO, then the numeric fields.
///
/// # Errors
///
/// Returns a [`ValidationError`] describing the first failed check.
pub fn build_launch_command(
    tools: &ToolPaths,
    fs: &dyn FileSystem,
    spec: &VmLaunchSpec,
) -> Result<CommandLine, ValidationError> {
    if spec.disk_path.as_os_str().is_empty() || !fs.exists(&spec.disk_path) {
        return Err(ValidationError::InvalidDisk(spec.disk_path.clone()));
    }
    let iso = spec.requested_iso();
    if let Some(iso) = iso {
        if !fs.exists(iso) {
            return Err(ValidationError::InvalidIso(iso.to_path_buf()));
        }
    }
    let ram = parse_optional_count("RAM (MB)", &spec.ram_mb)?;
    let cpus = parse_optional_count("CPU cores", &spec.cpu_cores)?;

    let mut cmd = CommandLine::new(&tools.vm_binary);
    if let Some(ram) = ram {
        cmd = cmd.flag("-m", ram.to_string());
    }
    if let Some(cpus) = cpus {
        cmd = cmd.flag("-smp", cpus.to_string());
    }
    cmd = cmd.arg("-hda").path(&spec.disk_path);
    if let Some(iso) = iso {
        cmd = cmd.arg("-cdrom").path(iso);
    }
    Ok(cmd)
}

/// Validates `spec` and assembles the disk creation command line.
///
/// # Errors
///
/// Returns a [`ValidationError`] for an empty destination or a size that is
/// not a positive whole number.
pub fn build_disk_command(
    tools: &ToolPaths,
    spec: &DiskCreateSpec,
) -> Result<CommandLine, ValidationError> {
    if spec.destination.as_os_str().is_empty() {
        return Err(ValidationError::EmptyTerm { field: "disk destination" });
    }
    let size = parse_optional_count("disk size (GB)", &spec.size_gb)?.ok_or_else(|| {
        ValidationError::InvalidNumber { field: "disk size (GB)", value: spec.size_gb.clone() }
    })?;

    Ok(CommandLine::new(&tools.img_tool)
        .arg("create")
        .flag("-f", DISK_FORMAT)
        .path(&normalize_disk_path(&spec.destination))
        .arg(format!("{size}G")))
}

/// VM operations over a [`ServiceContext`].
pub struct VmManager<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VmManager<'a> {
    /// Creates a manager using the given context.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Starts the VM as a detached process and returns immediately.
    ///
    /// Success means the hypervisor process was spawned, nothing more.
    ///
    /// # Errors
    ///
    /// Returns a validation error before spawning anything, or
    /// [`Error::Spawn`] if the hypervisor could not be started.
    pub fn launch(&self, spec: &VmLaunchSpec) -> Outcome {
        let cmd = build_launch_command(&self.ctx.tools, self.ctx.fs.as_ref(), spec)?;
        self.ctx.launcher.launch(&cmd).map_err(|e| Error::Spawn {
            program: cmd.program().to_string(),
            reason: e.to_string(),
        })?;
        Ok(format!("VM launching: {cmd}"))
    }

    /// Creates a disk image and waits for the tool to finish.
    ///
    /// # Errors
    ///
    /// Returns a validation error, or the disk tool's failure.
    pub fn create_disk(&self, spec: &DiskCreateSpec) -> Outcome {
        let cmd = build_disk_command(&self.ctx.tools, spec)?;
        execute(self.ctx.executor.as_ref(), &cmd)
    }

    /// Loads a VM configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigLoad`] if the file cannot be read or parsed.
    pub fn load_config(&self, path: &Path) -> Result<VmConfig, Error> {
        VmConfig::load(self.ctx.fs.as_ref(), path)
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::{fake_context, CountingLauncher, FakeExecutor};

    struct Fixture {
        _dir: tempfile::TempDir,
        disk: PathBuf,
        iso: PathBuf,
        missing: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let disk = dir.path().join("my disk.qcow2");
        let iso = dir.path().join("install.iso");
        std::fs::write(&disk, "").unwrap();
        std::fs::write(&iso, "").unwrap();
        let missing = dir.path().join("missing.iso");
        Fixture { _dir: dir, disk, iso, missing }
    }

    fn spec(disk: &Path) -> VmLaunchSpec {
        VmLaunchSpec {
            cpu_cores: "2".into(),
            ram_mb: "2048".into(),
            disk_path: disk.to_path_buf(),
            iso_path: None,
        }
    }

    #[test]
    fn launch_without_iso_omits_cdrom() {
        let fx = fixture();
        let executor = Arc::new(FakeExecutor::succeeding(""));
        let launcher = Arc::new(CountingLauncher::default());
        let ctx = fake_context(&executor, &launcher);

        let message = VmManager::new(&ctx).launch(&spec(&fx.disk)).unwrap();

        let launched = launcher.launched();
        assert_eq!(launched.len(), 1);
        let args = launched[0].args();
        assert!(args.contains(&OsStr::new("-hda")));
        assert!(!args.contains(&OsStr::new("-cdrom")));
        let expected = format!(
            "VM launching: qemu-system-x86_64 -m 2048 -smp 2 -hda \"{}\"",
            fx.disk.display()
        );
        assert_eq!(message, expected);
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn launch_with_iso_adds_cdrom() {
        let fx = fixture();
        let executor = Arc::new(FakeExecutor::succeeding(""));
        let launcher = Arc::new(CountingLauncher::default());
        let ctx = fake_context(&executor, &launcher);

        let mut with_iso = spec(&fx.disk);
        with_iso.iso_path = Some(fx.iso.clone());
        VmManager::new(&ctx).launch(&with_iso).unwrap();

        let argv = launcher.launched()[0].argv();
        let iso = fx.iso.to_string_lossy().into_owned();
        assert_eq!(argv[argv.len() - 2..], ["-cdrom".to_string(), iso]);
    }

    #[test]
    fn missing_iso_aborts_without_spawning() {
        let fx = fixture();
        let executor = Arc::new(FakeExecutor::succeeding(""));
        let launcher = Arc::new(CountingLauncher::default());
        let ctx = fake_context(&executor, &launcher);

        let mut bad = spec(&fx.disk);
        bad.iso_path = Some(fx.missing.clone());
        let err = VmManager::new(&ctx).launch(&bad).unwrap_err();

        assert_eq!(err.as_validation(), Some(&ValidationError::InvalidIso(fx.missing.clone())));
        assert!(launcher.launched().is_empty());
    }

    #[test]
    fn missing_disk_is_rejected_first() {
        let fx = fixture();
        let executor = Arc::new(FakeExecutor::succeeding(""));
        let launcher = Arc::new(CountingLauncher::default());
        let ctx = fake_context(&executor, &launcher);

        let mut bad = spec(&fx.missing);
        bad.iso_path = Some(fx.missing.clone());
        let err = VmManager::new(&ctx).launch(&bad).unwrap_err();

        assert!(matches!(err.as_validation(), Some(ValidationError::InvalidDisk(_))));
        assert!(launcher.launched().is_empty());
    }

    #[test]
    fn empty_numbers_are_omitted_and_bad_numbers_rejected() {
        let fx = fixture();
        let tools = ToolPaths::default();
        let fs = crate::adapters::live::filesystem::LiveFileSystem;

        let mut bare = spec(&fx.disk);
        bare.cpu_cores = String::new();
        bare.ram_mb = " ".into();
        let cmd = build_launch_command(&tools, &fs, &bare).unwrap();
        assert_eq!(cmd.args()[0], "-hda");

        bare.cpu_cores = "two; reboot".into();
        let err = build_launch_command(&tools, &fs, &bare).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "CPU cores", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_disk_path_is_passed_through() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let disk = dir.path().join(OsStr::from_bytes(b"disk\xff.qcow2"));
        std::fs::write(&disk, "").unwrap();
        let fs = crate::adapters::live::filesystem::LiveFileSystem;

        let cmd = build_launch_command(&ToolPaths::default(), &fs, &spec(&disk)).unwrap();

        let passed = Path::new(*cmd.args().last().unwrap());
        assert_eq!(passed, disk);
        assert!(passed.exists());
    }

    #[test]
    fn spawn_failure_is_reported() {
        let fx = fixture();
        let executor = Arc::new(FakeExecutor::succeeding(""));
        let launcher = Arc::new(CountingLauncher::failing("No such file or directory"));
        let ctx = fake_context(&executor, &launcher);

        let err = VmManager::new(&ctx).launch(&spec(&fx.disk)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Spawn);
        assert!(err.to_string().contains("No such file or directory"));
    }

    #[test]
    fn normalization_appends_default_extension_once() {
        let once = normalize_disk_path(Path::new("/vm/ubuntu"));
        assert_eq!(once, PathBuf::from("/vm/ubuntu.qcow2"));
        assert_eq!(normalize_disk_path(&once), once);

        let dotted = normalize_disk_path(Path::new("/vm/ubuntu.v2"));
        assert_eq!(dotted, PathBuf::from("/vm/ubuntu.v2.qcow2"));
        assert_eq!(normalize_disk_path(&dotted), dotted);

        assert_eq!(normalize_disk_path(Path::new("raw.img")), PathBuf::from("raw.img"));
    }

    #[test]
    fn create_disk_runs_img_tool() {
        let executor = Arc::new(FakeExecutor::succeeding("Formatting '/vm/new.qcow2'\n"));
        let launcher = Arc::new(CountingLauncher::default());
        let ctx = fake_context(&executor, &launcher);

        let spec = DiskCreateSpec { size_gb: "20".into(), destination: "/vm/new".into() };
        let output = VmManager::new(&ctx).create_disk(&spec).unwrap();

        assert_eq!(output, "Formatting '/vm/new.qcow2'");
        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].to_string(), "qemu-img create -f qcow2 \"/vm/new.qcow2\" 20G");
    }

    #[test]
    fn create_disk_rejects_fractional_size() {
        let executor = Arc::new(FakeExecutor::succeeding(""));
        let launcher = Arc::new(CountingLauncher::default());
        let ctx = fake_context(&executor, &launcher);

        let spec = DiskCreateSpec { size_gb: "1.5".into(), destination: "/vm/new".into() };
        let err = VmManager::new(&ctx).create_disk(&spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn create_disk_passes_tool_failure_through() {
        let executor = Arc::new(FakeExecutor::exiting(1, "", "qemu-img: Permission denied\n"));
        let launcher = Arc::new(CountingLauncher::default());
        let ctx = fake_context(&executor, &launcher);

        let spec = DiskCreateSpec { size_gb: "10".into(), destination: "/root/x.img".into() };
        let err = VmManager::new(&ctx).create_disk(&spec).unwrap_err();
        assert_eq!(err.to_string(), "qemu-img: Permission denied");
    }

    #[test]
    fn launch_spec_copies_config_fields() {
        let config = VmConfig {
            cpu: Some("4".into()),
            ram: None,
            disk_path: Some("/vm/a.qcow2".into()),
            iso_path: Some(String::new()),
        };
        let spec = VmLaunchSpec::from_config(&config);
        assert_eq!(spec.cpu_cores, "4");
        assert_eq!(spec.ram_mb, "");
        assert_eq!(spec.disk_path, PathBuf::from("/vm/a.qcow2"));
        assert!(spec.iso_path.is_none());
    }
}
