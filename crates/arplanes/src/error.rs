//! Error types for plane tracking, devices, configuration and placement.
//!
//! Registry and adapter operations never fail: malformed planes are skipped
//! and unknown identifiers are ignored. These errors cover the edges where
//! raw data enters the crate.

use std::path::PathBuf;

/// Errors raised while building a [`Plane`](crate::plane::Plane) from raw device data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaneError {
    #[error("model matrix must have 16 elements, got {len}")]
    InvalidMatrix { len: usize },
}

/// A color string that is not `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{input}': expected #RRGGBB")]
pub struct ColorParseError {
    pub input: String,
}

/// Errors from the device plane-tracking source.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeviceError {
    /// No AR-capable tracking source exists in this environment
    #[error("AR plane tracking is not supported: {0}")]
    Unavailable(String),

    /// The source went away after it was connected
    #[error("device disconnected: {0}")]
    Disconnected(String),
}

/// Errors loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors from placing an object at a hit-test result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("hit result has an unusable pose: {0}")]
    InvalidHit(String),
}
