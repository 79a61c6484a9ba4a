//! Line grammar for `pacmd list-*` output.
//!
//! `pacmd` prints one block per object. A device listing looks like this
//! (`→` is a tab):
//!
//! ```text
//! 2 sink(s) available.
//!   * index: 0
//! →name: <alsa_output.pci-0000_00_1f.3.analog-stereo>
//! →properties:
//! →→device.description = "Built-in Audio Analog Stereo"
//!     index: 1
//! →name: <alsa_output.usb-headset.analog-stereo>
//! →properties:
//! →→device.description = "USB Headset"
//! ```
//!
//! Stream listings (`list-sink-inputs`, `list-source-outputs`) use the same
//! four-column `index:` line without a default marker.
//!
//! Indentation is matched as any mix of spaces and tabs because `pacmd`
//! mixes both. Every pattern is anchored to a whole line so that the index
//! `1` can never match inside `10`.

use std::sync::OnceLock;

use regex::Regex;

/// `pacmd` output revision these patterns were captured against.
pub const GRAMMAR_VERSION: &str = "pulseaudio-16";

/// Start of a device block: two columns of indent, a marker column holding
/// `*` for the default device or blank otherwise, then `index: <N>`.
pub const MARKER_LINE: &str =
    r"^[ \t]{2}(?<marker>[ \t*])[ \t]index:[ \t]*(?<index>\d+)[ \t]*$";

/// The human-readable name property inside a device block.
pub const DESCRIPTION_FIELD: &str =
    r#"^[ \t]+device\.description[ \t]*=[ \t]*"(?<name>.*)"[ \t]*$"#;

/// One connected stream in a stream listing.
pub const STREAM_INDEX_LINE: &str = r"^[ \t]{4}index:[ \t]*(?<index>\d+)[ \t]*$";

fn compile(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in pattern must compile"))
}

/// Compiled [`MARKER_LINE`].
pub fn marker_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, MARKER_LINE)
}

/// Compiled [`DESCRIPTION_FIELD`].
pub fn description_field() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, DESCRIPTION_FIELD)
}

/// Compiled [`STREAM_INDEX_LINE`].
pub fn stream_index_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, STREAM_INDEX_LINE)
}
