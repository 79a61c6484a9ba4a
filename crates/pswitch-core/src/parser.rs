//! Parsing of `pacmd list-*` output.
//!
//! Device listings are first split into [`Block`]s on marker lines, then
//! fields are extracted per block. See [`crate::grammar`] for the patterns.

use tracing::trace;

use crate::device::{DeviceRecord, StreamIndex};
use crate::error::{Error, Result};
use crate::grammar;

/// One device block: the marker line plus every line up to the next marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Server index from the marker line
    pub index: u32,
    /// Whether the marker column held `*`
    pub is_default: bool,
    /// Lines following the marker line
    pub body: Vec<&'a str>,
}

impl Block<'_> {
    /// The first `device.description` value in this block, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        let re = grammar::description_field();
        self.body
            .iter()
            .find_map(|line| re.captures(line))
            .and_then(|caps| caps.name("name"))
            .map(|name| name.as_str())
    }

    /// Convert this block into a record.
    ///
    /// # Errors
    /// Returns [`Error::MissingDescription`] if the block has no description.
    pub fn to_record(&self) -> Result<DeviceRecord> {
        let name =
            self.description().ok_or(Error::MissingDescription { index: self.index })?;
        Ok(DeviceRecord::new(self.index, name, self.is_default))
    }
}

fn parse_index(digits: &str) -> Result<u32> {
    digits.parse().map_err(|_| Error::InvalidIndex(digits.to_string()))
}

/// Split device listing text into blocks, one per marker line.
///
/// Lines before the first marker (the `N sink(s) available.` header) are
/// dropped.
///
/// # Errors
/// Returns [`Error::InvalidIndex`] if a marker index does not fit in a `u32`.
pub fn segment(text: &str) -> Result<Vec<Block<'_>>> {
    let marker = grammar::marker_line();
    let mut blocks: Vec<Block<'_>> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = marker.captures(line) {
            blocks.push(Block {
                index: parse_index(&caps["index"])?,
                is_default: &caps["marker"] == "*",
                body: Vec::new(),
            });
        } else if let Some(block) = blocks.last_mut() {
            block.body.push(line);
        }
    }

    trace!(blocks = blocks.len(), "Segmented device listing");
    Ok(blocks)
}

/// Parse `pacmd list-sinks` / `pacmd list-sources` output.
///
/// Records are returned in listing order. Empty input yields an empty list.
///
/// # Errors
/// Fails as a whole if any block lacks a description or has an invalid index.
pub fn parse_device_list(text: &str) -> Result<Vec<DeviceRecord>> {
    segment(text)?.iter().map(Block::to_record).collect()
}

/// Parse `pacmd list-sink-inputs` / `pacmd list-source-outputs` output.
///
/// Indexes keep the server's order; duplicates are kept as given.
///
/// # Errors
/// Returns [`Error::InvalidIndex`] if an index does not fit in a `u32`.
pub fn parse_stream_indexes(text: &str) -> Result<Vec<StreamIndex>> {
    let re = grammar::stream_index_line();
    text.lines()
        .filter_map(|line| re.captures(line))
        .map(|caps| parse_index(&caps["index"]).map(StreamIndex))
        .collect()
}

/// Look up a single device by server index.
///
/// Only the block whose marker carries exactly `index` is inspected, so
/// malformed blocks for other devices do not affect the result.
///
/// # Errors
/// Returns [`Error::DeviceNotFound`] if no block has that index, or
/// [`Error::MissingDescription`] if the matching block has no description.
pub fn find_device(text: &str, index: u32) -> Result<DeviceRecord> {
    segment(text)?
        .iter()
        .find(|block| block.index == index)
        .ok_or(Error::DeviceNotFound(index))?
        .to_record()
}
