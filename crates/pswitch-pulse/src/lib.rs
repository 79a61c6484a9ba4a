//! pswitch Pulse - `pacmd` invocation and device switching.
//!
//! This crate handles all interactions with the audio server, including:
//! - Building `pacmd` command lines
//! - Running them with captured output and a timeout
//! - Querying devices and streams
//! - Switching the default device and moving streams to it

pub mod client;
pub mod command;
pub mod error;
pub mod runner;
pub mod switch;

pub use client::Pulse;
pub use command::PacmdCommand;
pub use error::{PulseError, PulseResult};
pub use runner::{CommandOutput, CommandRunner, PacmdRunner};
pub use switch::{MoveFailure, SwitchReport, switch_to_device};
