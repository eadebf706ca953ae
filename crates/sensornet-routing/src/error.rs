//! Error types for sensornet-routing.

use sensornet_topology::NodeId;
use thiserror::Error;

/// Result type for network and routing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by network construction and route queries.
///
/// A route that gets stuck is not an error; see
/// [`RouteOutcome::Stuck`](crate::RouteOutcome::Stuck).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A route query named a node that is not in the network.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// Fewer than two nodes; there is nothing to route between.
    #[error("network too small to route: {0} node(s)")]
    NetworkTooSmall(usize),

    /// Two nodes were given the same id.
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),

    /// A node failed validation.
    #[error("topology error: {0}")]
    Topology(#[from] sensornet_topology::Error),

    /// The grid could not be built or a node did not fit it.
    #[error("cluster error: {0}")]
    Cluster(#[from] sensornet_cluster::Error),
}
