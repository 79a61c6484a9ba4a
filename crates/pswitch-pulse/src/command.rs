//! `pacmd` invocations.

use std::fmt;

use pswitch_core::{DeviceKind, StreamIndex};

/// One `pacmd` invocation issued by pswitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacmdCommand {
    /// `list-sinks`
    ListSinks,
    /// `list-sources`
    ListSources,
    /// `list-sink-inputs`
    ListSinkInputs,
    /// `list-source-outputs`
    ListSourceOutputs,
    /// `set-default-sink <sink>`
    SetDefaultSink { sink: u32 },
    /// `set-default-source <source>`
    SetDefaultSource { source: u32 },
    /// `move-sink-input <stream> <sink>`
    MoveSinkInput { stream: StreamIndex, sink: u32 },
    /// `move-source-output <stream> <source>`
    MoveSourceOutput { stream: StreamIndex, source: u32 },
}

impl PacmdCommand {
    /// List all devices of a kind.
    #[must_use]
    pub fn list_devices(kind: DeviceKind) -> Self {
        match kind {
            DeviceKind::Sink => Self::ListSinks,
            DeviceKind::Source => Self::ListSources,
        }
    }

    /// List all streams attached to devices of a kind.
    #[must_use]
    pub fn list_streams(kind: DeviceKind) -> Self {
        match kind {
            DeviceKind::Sink => Self::ListSinkInputs,
            DeviceKind::Source => Self::ListSourceOutputs,
        }
    }

    /// Make `index` the default device of a kind.
    #[must_use]
    pub fn set_default(kind: DeviceKind, index: u32) -> Self {
        match kind {
            DeviceKind::Sink => Self::SetDefaultSink { sink: index },
            DeviceKind::Source => Self::SetDefaultSource { source: index },
        }
    }

    /// Move a stream to device `index`.
    #[must_use]
    pub fn move_stream(kind: DeviceKind, stream: StreamIndex, index: u32) -> Self {
        match kind {
            DeviceKind::Sink => Self::MoveSinkInput { stream, sink: index },
            DeviceKind::Source => Self::MoveSourceOutput { stream, source: index },
        }
    }

    /// The `pacmd` subcommand name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListSinks => "list-sinks",
            Self::ListSources => "list-sources",
            Self::ListSinkInputs => "list-sink-inputs",
            Self::ListSourceOutputs => "list-source-outputs",
            Self::SetDefaultSink { .. } => "set-default-sink",
            Self::SetDefaultSource { .. } => "set-default-source",
            Self::MoveSinkInput { .. } => "move-sink-input",
            Self::MoveSourceOutput { .. } => "move-source-output",
        }
    }

    /// Whether this command only reads state. `pacmd` prints nothing on a
    /// successful set or move.
    #[must_use]
    pub fn is_listing(&self) -> bool {
        matches!(
            self,
            Self::ListSinks | Self::ListSources | Self::ListSinkInputs | Self::ListSourceOutputs
        )
    }

    /// Arguments to pass to `pacmd`, subcommand first.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.name().to_string()];
        match *self {
            Self::ListSinks
            | Self::ListSources
            | Self::ListSinkInputs
            | Self::ListSourceOutputs => {}
            Self::SetDefaultSink { sink: index } | Self::SetDefaultSource { source: index } => {
                args.push(index.to_string());
            }
            Self::MoveSinkInput { stream, sink: index }
            | Self::MoveSourceOutput { stream, source: index } => {
                args.push(stream.to_string());
                args.push(index.to_string());
            }
        }
        args
    }
}

impl fmt::Display for PacmdCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args().join(" "))
    }
}
