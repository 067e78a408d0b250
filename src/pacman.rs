//! Delegation of package-manager operations to the native binary.
//!
//! Read-only operations (any op containing `-Q`, and sync info) run the
//! configured pacman binary directly. Everything else runs through `sudo`
//! with the pacman path as its first argument. The child shares the
//! parent's terminal and the parent blocks until it exits.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::Configuration;
use crate::{Error, Result};

/// Privilege-escalation helper for mutating operations.
pub const ESCALATION_BINARY: &str = "sudo";

/// Marker of query-class operations.
const QUERY_MARKER: &str = "-Q";

/// Sync-info operation tokens.
const SYNC_INFO_OPS: [&str; 2] = ["Si", "-Si"];

/// Returns true when `op` needs no elevated rights.
pub fn is_read_only(op: &str) -> bool {
    op.contains(QUERY_MARKER) || SYNC_INFO_OPS.contains(&op)
}

/// A fully built package manager command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable actually spawned
    pub program: PathBuf,
    /// Arguments passed to `program`
    pub args: Vec<OsString>,
    /// Whether `program` is the escalation helper
    pub elevated: bool,
}

impl Invocation {
    /// Build the command line for `op`, then `packages`, then `flags`.
    pub fn build(config: &Configuration, op: &str, packages: &[String], flags: &[String]) -> Self {
        let mut args = Vec::with_capacity(2 + packages.len() + flags.len());
        args.push(OsString::from(op));
        args.extend(packages.iter().map(OsString::from));
        args.extend(flags.iter().map(OsString::from));

        if is_read_only(op) {
            Self {
                program: config.pacman_bin.clone(),
                args,
                elevated: false,
            }
        } else {
            args.insert(0, config.pacman_bin.clone().into_os_string());
            Self {
                program: PathBuf::from(ESCALATION_BINARY),
                args,
                elevated: true,
            }
        }
    }

    /// Run with inherited stdio and wait for completion.
    ///
    /// A launch failure is [`Error::ChildProcess`]; a non-zero exit is
    /// [`Error::ChildExit`] carrying the child's status untouched.
    pub fn run(&self) -> Result<()> {
        let program = self.program.display().to_string();
        debug!(
            program = %program,
            args = ?self.args,
            elevated = self.elevated,
            "running package manager"
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::ChildProcess {
                program: program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::ChildExit { program, status })
        }
    }
}

/// Hand `op` to the package manager without modification.
pub fn run_package_manager(
    config: &Configuration,
    op: &str,
    packages: &[String],
    flags: &[String],
) -> Result<()> {
    Invocation::build(config, op, packages, flags).run()
}
