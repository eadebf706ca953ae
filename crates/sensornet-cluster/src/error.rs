//! Error types for sensornet-cluster.

use sensornet_topology::ClusterId;
use thiserror::Error;

/// Result type for clustering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while partitioning the plane.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The plane side is not a positive exact multiple of the cell side.
    #[error("invalid grid: plane side {max_coord} is not a positive multiple of cell side {cluster_size}")]
    InvalidGrid { max_coord: f64, cluster_size: f64 },

    /// A boundary policy name was not recognised.
    #[error("unknown boundary policy: {0} (expected random, lower or higher)")]
    InvalidPolicy(String),

    /// A cluster id outside the grid.
    #[error("cluster {0} is outside the grid")]
    UnknownCluster(ClusterId),

    /// A node failed a geometry check against the grid's plane.
    #[error(transparent)]
    Topology(#[from] sensornet_topology::Error),
}
