//! Device and stream queries over a [`CommandRunner`].

use pswitch_core::{DeviceKind, DeviceRecord, StreamIndex, parser};
use tracing::debug;

use crate::command::PacmdCommand;
use crate::error::PulseResult;
use crate::runner::{CommandRunner, PacmdRunner};

/// Client for the audio server, one `pacmd` invocation per call.
#[derive(Debug, Clone, Default)]
pub struct Pulse<R = PacmdRunner> {
    runner: R,
}

impl<R: CommandRunner> Pulse<R> {
    /// Create a client on top of a runner.
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// The underlying runner.
    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run a command and return its stdout, failing on a non-zero exit or
    /// an error message printed by a set or move.
    ///
    /// # Errors
    /// Returns an error if the command cannot be run or does not succeed.
    pub async fn execute(&self, command: PacmdCommand) -> PulseResult<String> {
        self.runner.run(&command).await?.into_stdout(&command)
    }

    /// List all devices of a kind in server order.
    ///
    /// # Errors
    /// Returns an error if `pacmd` fails or its output cannot be parsed.
    pub async fn list_devices(&self, kind: DeviceKind) -> PulseResult<Vec<DeviceRecord>> {
        let text = self.execute(PacmdCommand::list_devices(kind)).await?;
        let devices = parser::parse_device_list(&text)?;
        debug!(%kind, count = devices.len(), "Listed devices");
        Ok(devices)
    }

    /// Look up one device by server index.
    ///
    /// # Errors
    /// Returns an error if `pacmd` fails or no device has that index.
    pub async fn find_device(&self, kind: DeviceKind, index: u32) -> PulseResult<DeviceRecord> {
        let text = self.execute(PacmdCommand::list_devices(kind)).await?;
        Ok(parser::find_device(&text, index)?)
    }

    /// Indexes of all streams attached to devices of a kind.
    ///
    /// # Errors
    /// Returns an error if `pacmd` fails or its output cannot be parsed.
    pub async fn stream_indexes(&self, kind: DeviceKind) -> PulseResult<Vec<StreamIndex>> {
        let text = self.execute(PacmdCommand::list_streams(kind)).await?;
        let streams = parser::parse_stream_indexes(&text)?;
        debug!(%kind, count = streams.len(), "Listed streams");
        Ok(streams)
    }

    /// Make a device the default for its kind.
    ///
    /// # Errors
    /// Returns an error if the command fails.
    pub async fn set_default(&self, kind: DeviceKind, index: u32) -> PulseResult<()> {
        self.execute(PacmdCommand::set_default(kind, index)).await?;
        Ok(())
    }

    /// Move a stream to another device.
    ///
    /// # Errors
    /// Returns an error if the command fails.
    pub async fn move_stream(
        &self,
        kind: DeviceKind,
        stream: StreamIndex,
        index: u32,
    ) -> PulseResult<()> {
        self.execute(PacmdCommand::move_stream(kind, stream, index)).await?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::testing::FakeRunner;
    use super::*;
    use crate::error::PulseError;
    use crate::runner::CommandOutput;

    const LIST_SOURCES: &str = "2 source(s) available.
    index: 0
\tname: <alsa_output.pci-0000_00_1f.3.analog-stereo.monitor>
\tproperties:
\t\tdevice.description = \"Monitor of Built-in Audio\"
  * index: 1
\tname: <alsa_input.pci-0000_00_1f.3.analog-stereo>
\tproperties:
\t\tdevice.description = \"Built-in Audio Analog Stereo\"
";

    #[tokio::test]
    async fn test_list_devices() {
        let runner = FakeRunner::default()
            .respond(PacmdCommand::ListSources, CommandOutput::ok(LIST_SOURCES));
        let pulse = Pulse::new(runner);

        let devices = pulse.list_devices(DeviceKind::Source).await.expect("Failed to list");

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[1], DeviceRecord::new(1, "Built-in Audio Analog Stereo", true));
        assert_eq!(pulse.runner().calls(), vec![PacmdCommand::ListSources]);
    }

    #[tokio::test]
    async fn test_find_device_not_found() {
        let runner = FakeRunner::default()
            .respond(PacmdCommand::ListSources, CommandOutput::ok(LIST_SOURCES));
        let pulse = Pulse::new(runner);

        assert_matches!(
            pulse.find_device(DeviceKind::Source, 7).await,
            Err(PulseError::Core(pswitch_core::Error::DeviceNotFound(7)))
        );
    }

    #[tokio::test]
    async fn test_list_devices_command_failure() {
        let runner = FakeRunner::default().respond(
            PacmdCommand::ListSinks,
            CommandOutput::failed(1, "No PulseAudio daemon running."),
        );
        let pulse = Pulse::new(runner);

        assert_matches!(
            pulse.list_devices(DeviceKind::Sink).await,
            Err(PulseError::CommandFailed { code: Some(1), .. })
        );
    }

    #[tokio::test]
    async fn test_stream_indexes_uses_matching_listing() {
        let runner = FakeRunner::default().respond(
            PacmdCommand::ListSourceOutputs,
            CommandOutput::ok("1 source output(s) available.\n    index: 3\n\tdriver: <x>\n"),
        );
        let pulse = Pulse::new(runner);

        let streams = pulse.stream_indexes(DeviceKind::Source).await.unwrap();

        assert_eq!(streams, vec![StreamIndex(3)]);
        assert_eq!(pulse.runner().calls(), vec![PacmdCommand::ListSourceOutputs]);
    }
}
