//! Command execution utilities

use crate::utils::error::{ConfigureError, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// A program plus its argument vector, run inside the target root.
///
/// Arguments are handed to the process verbatim; nothing goes through a shell,
/// so interpolated values such as the distro version cannot inject commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChrootCommand {
    program: String,
    args: Vec<String>,
}

impl ChrootCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Append an owned argument (used for interpolated values)
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ChrootCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Where a child's stdout/stderr go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Passed through to our own streams
    Inherit,
    /// Sent to /dev/null
    Discard,
}

impl OutputMode {
    fn stdio(self) -> Stdio {
        match self {
            Self::Inherit => Stdio::inherit(),
            Self::Discard => Stdio::null(),
        }
    }
}

/// Run `chroot <root> <program> <args...>` and wait for it.
pub fn run_chroot(root: &Path, command: &ChrootCommand, mode: OutputMode) -> Result<()> {
    debug!("Running: chroot {} {}", root.display(), command);

    let status = Command::new("chroot")
        .arg(root)
        .arg(command.program())
        .args(command.args())
        .stdin(Stdio::null())
        .stdout(mode.stdio())
        .stderr(mode.stdio())
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigureError::CommandNotFound("chroot".to_string())
            } else {
                ConfigureError::Io(e)
            }
        })?;

    if !status.success() {
        return Err(ConfigureError::CommandFailed {
            command: command.to_string(),
            status: status.to_string(),
        });
    }

    Ok(())
}

/// Wrapper for chroot execution that carries the run-wide output and dry-run settings
#[derive(Debug, Clone, Copy)]
pub struct CommandRunner {
    dry_run: bool,
    verbose: bool,
    interrupted: fn() -> bool,
}

impl CommandRunner {
    pub fn new(dry_run: bool, verbose: bool) -> Self {
        Self {
            dry_run,
            verbose,
            interrupted: crate::utils::signal::is_interrupted,
        }
    }

    /// Replace the interrupt check (the signal flag by default)
    pub fn with_interrupt_check(mut self, check: fn() -> bool) -> Self {
        self.interrupted = check;
        self
    }

    pub fn is_interrupted(&self) -> bool {
        (self.interrupted)()
    }

    /// Output handling for one command. `quiet` forces discarding even in verbose runs.
    pub fn output_mode(&self, quiet: bool) -> OutputMode {
        if self.verbose && !quiet {
            OutputMode::Inherit
        } else {
            OutputMode::Discard
        }
    }

    pub fn run_in_chroot(&self, root: &Path, command: &ChrootCommand, quiet: bool) -> Result<()> {
        if self.is_interrupted() {
            return Err(ConfigureError::Interrupted);
        }
        if self.dry_run {
            println!("  [dry-run] chroot {} {}", root.display(), command);
            Ok(())
        } else {
            run_chroot(root, command, self.output_mode(quiet))
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
