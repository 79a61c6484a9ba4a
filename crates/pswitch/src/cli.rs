//! Command-line arguments.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use pswitch_core::DeviceKind;

/// Printed for any malformed invocation.
pub const USAGE: &str = "Usage: pswitch type [index]
Where:
    type is i[nput] or o[utput]
    index is a pulse audio sink index or source index";

/// Switch the default PulseAudio sink or source.
#[derive(Debug, Parser)]
#[command(name = "pswitch", version, about, override_usage = "pswitch <i|input|o|output> [index]")]
pub struct Cli {
    /// Device type: i[nput] or o[utput]
    #[arg(value_enum, ignore_case = true)]
    pub kind: KindArg,

    /// Server index of the device; omit to pick from a menu
    pub index: Option<u32>,
}

/// Device type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Sources (microphones)
    #[value(name = "i", alias = "input")]
    Input,
    /// Sinks (speakers, headphones)
    #[value(name = "o", alias = "output")]
    Output,
}

impl From<KindArg> for DeviceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Input => Self::Source,
            KindArg::Output => Self::Sink,
        }
    }
}

/// Parse arguments, returning `None` if they are malformed.
///
/// `--help` and `--version` print and exit as usual.
pub fn parse_args<I, T>(args: I) -> Option<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Some(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => None,
    }
}
