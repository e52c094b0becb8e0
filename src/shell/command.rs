//! Subprocess execution.
//!
//! Programs are spawned directly with `std::process::Command` rather than
//! through a shell, so arguments reach the child exactly as planned.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A single program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable name or path.
    pub program: String,

    /// Arguments, passed verbatim.
    pub args: Vec<String>,

    /// Working directory (inherits the parent's when `None`).
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Create an invocation with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run in the given directory.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Collect stdout/stderr into the result.
    Captured,
    /// Share the parent's terminal.
    Inherited,
}

/// Result of running a subprocess.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a result from an exit code.
    pub fn from_exit(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            success: exit_code == Some(0),
            exit_code,
            stdout,
            stderr,
            duration,
        }
    }
}

/// Spawns subprocesses on behalf of the bootstrap sequence.
///
/// An `Err` means the program could not be started at all (typically
/// `NotFound`); a started program that fails is an `Ok` with
/// `success == false`.
pub trait ProcessRunner {
    fn run(&mut self, invocation: &Invocation, stdio: StdioMode)
        -> std::io::Result<CommandResult>;
}

/// Runner backed by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(
        &mut self,
        invocation: &Invocation,
        stdio: StdioMode,
    ) -> std::io::Result<CommandResult> {
        let start = Instant::now();

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if let Some(cwd) = &invocation.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!("Spawning: {}", invocation);

        let result = match stdio {
            StdioMode::Captured => {
                cmd.stdin(Stdio::null());
                let output = cmd.output()?;
                CommandResult::from_exit(
                    output.status.code(),
                    String::from_utf8_lossy(&output.stdout).to_string(),
                    String::from_utf8_lossy(&output.stderr).to_string(),
                    start.elapsed(),
                )
            }
            StdioMode::Inherited => {
                let status = cmd
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()?;
                CommandResult::from_exit(
                    status.code(),
                    String::new(),
                    String::new(),
                    start.elapsed(),
                )
            }
        };

        tracing::debug!(
            "{} exited with {:?} after {:?}",
            invocation.program,
            result.exit_code,
            result.duration
        );

        Ok(result)
    }
}
