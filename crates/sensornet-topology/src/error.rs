//! Error types for sensornet-topology.

use thiserror::Error;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing nodes or planes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A scalar node attribute was zero, negative, or not finite.
    #[error("invalid {field}: {value} (must be positive and finite)")]
    InvalidParameter { field: &'static str, value: f64 },

    /// A position fell outside the configured plane.
    #[error("position ({x}, {y}) is outside the plane [0, {side}]")]
    OutOfBounds { x: f64, y: f64, side: f64 },

    /// The plane side length was not positive and finite.
    #[error("invalid plane side length: {0}")]
    InvalidPlane(f64),
}
