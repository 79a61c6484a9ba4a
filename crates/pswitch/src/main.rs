//! pswitch - switch the default PulseAudio sink or source.
//!
//! Lists devices through `pacmd`, makes the chosen one the default and moves
//! every running stream of the same kind over to it.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use pswitch_core::{DeviceKind, DeviceRecord};
use pswitch_pulse::{CommandRunner, Pulse, switch_to_device};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod menu;

use cli::Cli;

/// How a switch that got as far as changing the default ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Default changed and every stream moved
    Switched,
    /// Default changed but some streams stayed behind
    Incomplete,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Switched => Self::SUCCESS,
            Outcome::Incomplete => Self::FAILURE,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let Some(cli) = cli::parse_args(std::env::args_os()) else {
        println!("{}", cli::USAGE);
        return ExitCode::SUCCESS;
    };

    let config = match config::load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("pswitch: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.general.log_level);

    let pulse = Pulse::new(config.pacmd.runner());
    match run(&pulse, &cli, &mut io::stdin().lock(), &mut io::stdout()).await {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            eprintln!("pswitch: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run<R, I, W>(
    pulse: &Pulse<R>,
    cli: &Cli,
    input: &mut I,
    output: &mut W,
) -> Result<Outcome>
where
    R: CommandRunner,
    I: BufRead,
    W: Write,
{
    let kind = DeviceKind::from(cli.kind);

    let device = match cli.index {
        Some(index) => pulse
            .find_device(kind, index)
            .await
            .with_context(|| format!("Failed to look up {kind} {index}"))?,
        None => choose_device(pulse, kind, input, output).await?,
    };

    writeln!(output, "Switching to {kind} \"{}\"...", device.name)?;
    output.flush()?;
    let report = switch_to_device(pulse, kind, device.index)
        .await
        .with_context(|| format!("Failed to switch to {kind} {}", device.index))?;

    if report.is_complete() {
        info!(moved = report.moved.len(), "Switched");
        return Ok(Outcome::Switched);
    }

    for failure in &report.failed {
        eprintln!(
            "pswitch: could not move {} {}: {}",
            kind.stream_label(),
            failure.stream,
            failure.error
        );
    }
    Ok(Outcome::Incomplete)
}

/// List devices and let the user pick one from a menu.
async fn choose_device<R, I, W>(
    pulse: &Pulse<R>,
    kind: DeviceKind,
    input: &mut I,
    output: &mut W,
) -> Result<DeviceRecord>
where
    R: CommandRunner,
    I: BufRead,
    W: Write,
{
    let mut devices = pulse
        .list_devices(kind)
        .await
        .with_context(|| format!("Failed to list {}", kind.plural()))?;
    if devices.is_empty() {
        bail!("No {} available", kind.plural());
    }

    write!(output, "{}", menu::render(kind, &devices))?;
    let selection =
        menu::prompt(input, output, devices.len()).context("Failed to read selection")?;

    match selection {
        Some(position) => Ok(devices.swap_remove(position)),
        None => bail!("No {} selected", kind.label()),
    }
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Cursor;

    use parking_lot::Mutex;
    use pswitch_core::StreamIndex;
    use pswitch_pulse::{CommandOutput, PacmdCommand, PulseResult};

    use super::*;
    use crate::cli::KindArg;

    const LIST_SINKS: &str = "2 sink(s) available.
  * index: 0
\tname: <alsa_output.pci-0000_00_1f.3.analog-stereo>
\tproperties:
\t\tdevice.description = \"Built-in Audio\"
    index: 10
\tname: <alsa_output.usb-headset.analog-stereo>
\tproperties:
\t\tdevice.description = \"USB Headset\"
";

    const LIST_SINK_INPUTS: &str = "1 sink input(s) available.
    index: 4
\tdriver: <protocol-native.c>
\tsink: 0 <alsa_output.pci-0000_00_1f.3.analog-stereo>
";

    /// Answers listings from a script; everything else succeeds silently.
    #[derive(Default)]
    struct ScriptedRunner {
        responses: HashMap<PacmdCommand, CommandOutput>,
        calls: Mutex<Vec<PacmdCommand>>,
    }

    impl ScriptedRunner {
        fn respond(mut self, command: PacmdCommand, output: CommandOutput) -> Self {
            self.responses.insert(command, output);
            self
        }

        fn calls(&self) -> Vec<PacmdCommand> {
            self.calls.lock().clone()
        }
    }

    impl CommandRunner for ScriptedRunner {
        async fn run(&self, command: &PacmdCommand) -> PulseResult<CommandOutput> {
            self.calls.lock().push(*command);
            Ok(self.responses.get(command).cloned().unwrap_or_else(|| CommandOutput::ok("")))
        }
    }

    fn sinks() -> ScriptedRunner {
        ScriptedRunner::default()
            .respond(PacmdCommand::ListSinks, CommandOutput::ok(LIST_SINKS))
            .respond(PacmdCommand::ListSinkInputs, CommandOutput::ok(LIST_SINK_INPUTS))
    }

    fn output_sinks(index: Option<u32>) -> Cli {
        Cli { kind: KindArg::Output, index }
    }

    #[tokio::test]
    async fn test_menu_position_maps_to_server_index() {
        let pulse = Pulse::new(sinks());
        let mut input = Cursor::new("1\n");
        let mut output = Vec::new();

        let outcome = run(&pulse, &output_sinks(None), &mut input, &mut output).await.unwrap();

        assert_eq!(outcome, Outcome::Switched);
        assert_eq!(
            pulse.runner().calls(),
            vec![
                PacmdCommand::ListSinks,
                PacmdCommand::SetDefaultSink { sink: 10 },
                PacmdCommand::ListSinkInputs,
                PacmdCommand::MoveSinkInput { stream: StreamIndex(4), sink: 10 },
            ]
        );

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.starts_with("Available Pulse Audio sinks:\n"));
        assert!(printed.contains("\t0: (active default) Built-in Audio\n\t1: USB Headset\n"));
        assert!(printed.ends_with("? Switching to sink \"USB Headset\"...\n"));
    }

    #[tokio::test]
    async fn test_direct_index_prints_device_name() {
        let pulse = Pulse::new(sinks());
        let mut output = Vec::new();

        let outcome =
            run(&pulse, &output_sinks(Some(0)), &mut Cursor::new(""), &mut output).await.unwrap();

        assert_eq!(outcome, Outcome::Switched);
        assert_eq!(String::from_utf8(output).unwrap(), "Switching to sink \"Built-in Audio\"...\n");
        assert_eq!(pulse.runner().calls()[1], PacmdCommand::SetDefaultSink { sink: 0 });
    }

    #[tokio::test]
    async fn test_failed_move_is_incomplete() {
        let runner = sinks().respond(
            PacmdCommand::MoveSinkInput { stream: StreamIndex(4), sink: 10 },
            CommandOutput::failed(1, "Moved failed."),
        );
        let pulse = Pulse::new(runner);
        let mut output = Vec::new();

        let outcome =
            run(&pulse, &output_sinks(Some(10)), &mut Cursor::new(""), &mut output).await.unwrap();

        assert_eq!(outcome, Outcome::Incomplete);
        assert_eq!(format!("{:?}", ExitCode::from(outcome)), format!("{:?}", ExitCode::FAILURE));
        assert!(pulse.runner().calls().contains(&PacmdCommand::SetDefaultSink { sink: 10 }));
    }

    #[tokio::test]
    async fn test_unknown_index_switches_nothing() {
        let pulse = Pulse::new(sinks());
        let mut output = Vec::new();

        let err = run(&pulse, &output_sinks(Some(1)), &mut Cursor::new(""), &mut output)
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("Device not found: 1"));
        assert_eq!(pulse.runner().calls(), vec![PacmdCommand::ListSinks]);
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_menu_end_of_input_switches_nothing() {
        let pulse = Pulse::new(sinks());
        let mut output = Vec::new();

        let result = run(&pulse, &output_sinks(None), &mut Cursor::new("7\n"), &mut output).await;

        assert!(result.is_err());
        assert_eq!(pulse.runner().calls(), vec![PacmdCommand::ListSinks]);
    }

    #[tokio::test]
    async fn test_empty_device_list_is_error() {
        let runner = ScriptedRunner::default()
            .respond(PacmdCommand::ListSources, CommandOutput::ok("0 source(s) available.\n"));
        let pulse = Pulse::new(runner);
        let cli = Cli { kind: KindArg::Input, index: None };

        let mut output = Vec::new();

        let err = run(&pulse, &cli, &mut Cursor::new("0\n"), &mut output).await.unwrap_err();

        assert_eq!(err.to_string(), "No sources available");
    }
}
