//! Interactive device selection.

use std::io::{self, BufRead, Write};

use pswitch_core::{DeviceKind, DeviceRecord};
use thiserror::Error;

/// Why a line typed at the prompt was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Not a number: {0:?}")]
    NotANumber(String),

    #[error("Selection {selection} out of range (0-{})", .count.saturating_sub(1))]
    OutOfRange { selection: usize, count: usize },
}

/// Render the device menu. Rows are numbered by position, not server index.
#[must_use]
pub fn render(kind: DeviceKind, devices: &[DeviceRecord]) -> String {
    let mut menu = format!("Available Pulse Audio {}:\n", kind.plural());
    for (position, device) in devices.iter().enumerate() {
        let marker = if device.is_default { "(active default) " } else { "" };
        menu.push_str(&format!("\t{position}: {marker}{}\n", device.name));
    }
    menu
}

/// Parse one answer to the prompt into a menu position.
///
/// # Errors
/// Returns an error if the input is not an integer in `0..count`.
pub fn parse_selection(input: &str, count: usize) -> Result<usize, SelectionError> {
    let input = input.trim();
    let selection: usize =
        input.parse().map_err(|_| SelectionError::NotANumber(input.to_string()))?;
    if selection >= count {
        return Err(SelectionError::OutOfRange { selection, count });
    }
    Ok(selection)
}

/// Prompt with `? ` until a valid position is entered.
///
/// Returns `None` if input ends first.
///
/// # Errors
/// Returns an error if reading or writing fails.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    count: usize,
) -> io::Result<Option<usize>> {
    let mut line = String::new();
    loop {
        write!(output, "? ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match parse_selection(&line, count) {
            Ok(selection) => return Ok(Some(selection)),
            Err(e) => tracing::debug!(error = %e, "Rejected selection"),
        }
    }
}
