//! pswitch Core - Device model and `pacmd` output parsing.
//!
//! This crate contains the domain types shared by the `pacmd` client and the
//! command-line front end, together with the parser that turns `pacmd list-*`
//! output into structured records.

pub mod device;
pub mod error;
pub mod grammar;
pub mod parser;

pub use device::{DeviceKind, DeviceRecord, StreamIndex};
pub use error::{Error, Result};
pub use parser::{find_device, parse_device_list, parse_stream_indexes, segment, Block};
