//! PHP interpreter inspection.

use std::fmt;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Whether the xdebug extension is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XdebugStatus {
    Active,
    Disabled,
}

impl fmt::Display for XdebugStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XdebugStatus::Active => write!(f, "Active"),
            XdebugStatus::Disabled => write!(f, "Disabled"),
        }
    }
}

/// Answers questions about the PHP runtime serving the installation.
pub trait InterpreterProbe {
    fn version(&self) -> Result<String>;
    fn loaded_modules(&self) -> Result<Vec<String>>;

    fn xdebug_status(&self) -> Result<XdebugStatus> {
        let loaded = self
            .loaded_modules()?
            .iter()
            .any(|m| m.trim().eq_ignore_ascii_case("xdebug"));
        Ok(if loaded {
            XdebugStatus::Active
        } else {
            XdebugStatus::Disabled
        })
    }
}

/// Probes a PHP binary by running it.
pub struct PhpBinary {
    binary: String,
}

impl PhpBinary {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        debug!("Running {} {}", self.binary, args.join(" "));
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::Interpreter(format!("Failed to run {}: {}", self.binary, e)))?;

        if !output.status.success() {
            return Err(Error::Interpreter(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl InterpreterProbe for PhpBinary {
    fn version(&self) -> Result<String> {
        let version = self.run(&["-r", "echo PHP_VERSION;"])?;
        Ok(version.trim().to_string())
    }

    fn loaded_modules(&self) -> Result<Vec<String>> {
        let listing = self.run(&["-m"])?;
        Ok(parse_module_listing(&listing))
    }
}

/// Parses `php -m` output, skipping the `[PHP Modules]` style headers.
fn parse_module_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('['))
        .map(|line| line.to_string())
        .collect()
}
