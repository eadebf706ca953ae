//! Read-only views of a network for display and persistence.

use sensornet_cluster::BoundaryPolicy;
use sensornet_topology::{ClusterId, Node, NodeId, Position};

/// One node as seen from outside the network.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeView {
    pub id: NodeId,
    pub position: Position,
    pub radius: f64,
    pub energy: f64,
    pub processing_power: f64,
    pub fitness: f64,
    pub cluster: Option<ClusterId>,
}

impl From<&Node> for NodeView {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id(),
            position: node.position(),
            radius: node.radius(),
            energy: node.energy(),
            processing_power: node.processing_power(),
            fitness: node.fitness(),
            cluster: node.cluster(),
        }
    }
}

/// One cluster with member and head ids resolved.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterView {
    pub id: ClusterId,
    pub center: Position,
    pub members: Vec<NodeId>,
    pub head: Option<NodeId>,
}

/// Nodes and clusters of a network at one point in time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkSnapshot {
    pub max_coord: f64,
    pub cluster_size: f64,
    pub boundary: BoundaryPolicy,
    pub nodes: Vec<NodeView>,
    pub clusters: Vec<ClusterView>,
}

impl NetworkSnapshot {
    /// Clusters with at least one member.
    pub fn occupied(&self) -> impl Iterator<Item = &ClusterView> {
        self.clusters.iter().filter(|c| !c.members.is_empty())
    }
}
