//! Error types for pswitch core.

use thiserror::Error;

/// Core error type for parsing and device lookup.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Device {index} has no device.description field")]
    MissingDescription { index: u32 },

    #[error("Invalid device index: {0}")]
    InvalidIndex(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(u32),
}

/// Result type alias for pswitch core operations.
pub type Result<T> = std::result::Result<T, Error>;
