//! Error types for the simulator shell.

use thiserror::Error;

/// Result type for shell operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring, loading, or saving a network.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file or the console failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the network input could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The input ended before the declared number of nodes.
    #[error("input declares {expected} nodes but only {found} were read")]
    Truncated { expected: usize, found: usize },

    /// An environment setting had an unusable value.
    #[error("invalid {var}: {value}")]
    Config { var: &'static str, value: String },

    /// Building the network or answering a route query failed.
    #[error(transparent)]
    Network(#[from] sensornet_routing::Error),

    /// Snapshot export failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
