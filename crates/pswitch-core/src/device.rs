//! Audio device and stream definitions.

use std::fmt;

/// Which side of the audio server a device sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Output device (speakers, headphones)
    Sink,
    /// Input device (microphone)
    Source,
}

impl DeviceKind {
    /// Singular label, e.g. "sink".
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sink => "sink",
            Self::Source => "source",
        }
    }

    /// Plural label, e.g. "sinks".
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Sink => "sinks",
            Self::Source => "sources",
        }
    }

    /// Label of the streams attached to this kind of device.
    #[must_use]
    pub fn stream_label(self) -> &'static str {
        match self {
            Self::Sink => "sink input",
            Self::Source => "source output",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A sink or source as listed by the audio server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Server-assigned index (not necessarily contiguous)
    pub index: u32,
    /// Value of the `device.description` property
    pub name: String,
    /// Whether this device is the current default
    pub is_default: bool,
}

impl DeviceRecord {
    /// Create a new device record.
    #[must_use]
    pub fn new(index: u32, name: impl Into<String>, is_default: bool) -> Self {
        Self { index, name: name.into(), is_default }
    }
}

/// Index of a stream (sink input or source output) connected to a device.
///
/// Only meaningful between enumerating the streams and acting on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamIndex(pub u32);

impl fmt::Display for StreamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for StreamIndex {
    fn from(index: u32) -> Self {
        Self(index)
    }
}
