//! Pulse error types.

use std::time::Duration;

use thiserror::Error;

/// Error raised while talking to the audio server through `pacmd`.
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`pacmd {command}` {}: {stderr}", exit_status(.code))]
    CommandFailed { command: String, code: Option<i32>, stderr: String },

    #[error("`pacmd {command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error(transparent)]
    Core(#[from] pswitch_core::Error),
}

#[allow(clippy::ref_option)]
fn exit_status(code: &Option<i32>) -> String {
    code.map_or_else(|| "was killed by a signal".to_string(), |c| format!("exited with status {c}"))
}

/// Result type for Pulse operations.
pub type PulseResult<T> = Result<T, PulseError>;
