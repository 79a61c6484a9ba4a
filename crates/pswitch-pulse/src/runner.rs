//! Running `pacmd` as a child process.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::command::PacmdCommand;
use crate::error::{PulseError, PulseResult};

/// Exit status and captured output of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self { code: Some(0), stdout: stdout.into(), stderr: String::new() }
    }

    /// Failed output with the given exit code and stderr.
    #[must_use]
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self { code: Some(code), stdout: String::new(), stderr: stderr.into() }
    }

    /// Whether the process exited with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Return stdout if the command succeeded.
    ///
    /// # Errors
    /// Returns [`PulseError::CommandFailed`] for a non-zero exit, or when a
    /// set or move command prints anything: `pacmd` reports errors such as
    /// `Sink 9 does not exist.` on stdout while still exiting 0. For a
    /// non-zero exit stdout is used as the message when stderr is empty.
    pub fn into_stdout(self, command: &PacmdCommand) -> PulseResult<String> {
        if self.success() {
            if command.is_listing() || self.stdout.trim().is_empty() {
                return Ok(self.stdout);
            }
            return Err(PulseError::CommandFailed {
                command: command.to_string(),
                code: self.code,
                stderr: self.stdout.trim().to_string(),
            });
        }

        let message = if self.stderr.trim().is_empty() { self.stdout } else { self.stderr };
        Err(PulseError::CommandFailed {
            command: command.to_string(),
            code: self.code,
            stderr: message.trim().to_string(),
        })
    }
}

/// Something that can execute a [`PacmdCommand`].
pub trait CommandRunner {
    /// Run a command to completion and capture its output.
    ///
    /// A non-zero exit is not an error at this level; it is reported through
    /// [`CommandOutput::code`].
    fn run(&self, command: &PacmdCommand) -> impl Future<Output = PulseResult<CommandOutput>>;
}

/// Runs commands through the `pacmd` executable.
#[derive(Debug, Clone)]
pub struct PacmdRunner {
    program: String,
    leading_args: Vec<String>,
    timeout: Duration,
}

impl PacmdRunner {
    /// Per-invocation timeout used unless overridden.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a runner for the given executable.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), leading_args: Vec::new(), timeout: Self::DEFAULT_TIMEOUT }
    }

    /// Arguments placed before the `pacmd` subcommand.
    #[must_use]
    pub fn with_leading_args(mut self, args: Vec<String>) -> Self {
        self.leading_args = args;
        self
    }

    /// Set the per-invocation timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Executable this runner invokes.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Per-invocation timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for PacmdRunner {
    fn default() -> Self {
        Self::new("pacmd")
    }
}

impl CommandRunner for PacmdRunner {
    async fn run(&self, command: &PacmdCommand) -> PulseResult<CommandOutput> {
        debug!(program = %self.program, %command, "Running pacmd");

        let mut child = Command::new(&self.program);
        child
            .args(&self.leading_args)
            .args(command.args())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, child.output()).await {
            Ok(result) => result
                .map_err(|source| PulseError::Spawn { program: self.program.clone(), source })?,
            Err(_) => {
                warn!(%command, timeout = ?self.timeout, "pacmd timed out");
                return Err(PulseError::Timeout {
                    command: command.to_string(),
                    timeout: self.timeout,
                });
            }
        };

        let output = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(%command, code = ?output.code, bytes = output.stdout.len(), "pacmd finished");

        Ok(output)
    }
}
