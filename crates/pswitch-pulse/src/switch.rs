//! Switching the default device and moving streams to it.

use futures::future::join_all;
use pswitch_core::{DeviceKind, StreamIndex};
use tracing::{info, warn};

use crate::client::Pulse;
use crate::error::{PulseError, PulseResult};
use crate::runner::CommandRunner;

/// A stream that could not be moved to the new default device.
#[derive(Debug)]
pub struct MoveFailure {
    /// Stream that stayed on its old device
    pub stream: StreamIndex,
    /// Why the move failed
    pub error: PulseError,
}

/// Outcome of a switch whose default-device change succeeded.
#[derive(Debug)]
pub struct SwitchReport {
    /// Kind of device switched
    pub kind: DeviceKind,
    /// New default device index
    pub target: u32,
    /// Streams moved to the target
    pub moved: Vec<StreamIndex>,
    /// Streams that could not be moved
    pub failed: Vec<MoveFailure>,
}

impl SwitchReport {
    /// Whether every stream was moved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Make `target` the default device of `kind` and move every connected
/// stream of that kind to it.
///
/// The default is set first, then streams are enumerated, then all moves
/// are issued concurrently. Streams that appear after enumeration are not
/// moved.
///
/// # Errors
/// Returns an error if setting the default or enumerating streams fails; no
/// later step runs. Failed moves do not abort the switch and are listed in
/// [`SwitchReport::failed`] instead.
pub async fn switch_to_device<R: CommandRunner>(
    pulse: &Pulse<R>,
    kind: DeviceKind,
    target: u32,
) -> PulseResult<SwitchReport> {
    pulse.set_default(kind, target).await?;
    info!(%kind, target, "Default device set");

    let streams = pulse.stream_indexes(kind).await?;

    let results =
        join_all(streams.iter().map(|&stream| pulse.move_stream(kind, stream, target))).await;

    let mut moved = Vec::new();
    let mut failed = Vec::new();
    for (stream, result) in streams.into_iter().zip(results) {
        match result {
            Ok(()) => moved.push(stream),
            Err(error) => {
                warn!(%kind, %stream, target, %error, "Failed to move {}", kind.stream_label());
                failed.push(MoveFailure { stream, error });
            }
        }
    }

    info!(%kind, target, moved = moved.len(), failed = failed.len(), "Switch finished");
    Ok(SwitchReport { kind, target, moved, failed })
}
