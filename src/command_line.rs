//! Typed argument vectors for external tool invocations.
//!
//! A [`CommandLine`] is passed to the process primitive as argv, so values
//! containing spaces or shell metacharacters arrive at the tool intact. The
//! `Display` form exists only for echoing the command back to the user: it
//! wraps path arguments in double quotes, matching how the tools document
//! their invocations.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Arg {
    Plain(OsString),
    Path(OsString),
}

impl Arg {
    fn as_os_str(&self) -> &OsStr {
        match self {
            Self::Plain(s) | Self::Path(s) => s,
        }
    }
}

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<Arg>,
}

impl CommandLine {
    /// Starts a command line for `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    /// Appends a plain argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        let value: String = value.into();
        self.args.push(Arg::Plain(value.into()));
        self
    }

    /// Appends a flag followed by its value.
    #[must_use]
    pub fn flag(self, name: &str, value: impl Into<String>) -> Self {
        self.arg(name).arg(value)
    }

    /// Appends a filesystem path argument (rendered quoted). The bytes are
    /// passed to the tool unchanged, even when they are not valid UTF-8.
    #[must_use]
    pub fn path(mut self, value: &Path) -> Self {
        self.args.push(Arg::Path(value.as_os_str().to_owned()));
        self
    }

    /// The program to execute.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments, without the program, exactly as handed to the OS.
    #[must_use]
    pub fn args(&self) -> Vec<&OsStr> {
        self.args.iter().map(Arg::as_os_str).collect()
    }

    /// Program followed by arguments as text. Non-UTF-8 bytes are replaced,
    /// so this form is for matching and display only.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.as_os_str().to_string_lossy().into_owned()))
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            match arg {
                Arg::Plain(s) => write!(f, " {}", s.to_string_lossy())?,
                Arg::Path(s) => write!(f, " \"{}\"", s.to_string_lossy())?,
            }
        }
        Ok(())
    }
}
