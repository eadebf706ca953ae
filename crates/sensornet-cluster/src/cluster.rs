//! A single grid cell and its members.

use rand::Rng;
use sensornet_topology::{ClusterId, Node, Position};
use tracing::debug;

use crate::election::{elect, Election};

/// One cell of the cluster grid.
///
/// Members are slots into the owning network's node list. The head, once
/// elected, is always one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    id: ClusterId,
    members: Vec<usize>,
    head: Option<usize>,
}

impl Cluster {
    /// Create an empty cluster.
    pub fn new(id: ClusterId) -> Self {
        Self {
            id,
            members: Vec::new(),
            head: None,
        }
    }

    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Member slots in insertion order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Slot of the elected head.
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.members.contains(&slot)
    }

    /// Add a node slot to this cluster.
    pub fn add_member(&mut self, slot: usize) {
        self.members.push(slot);
    }

    /// Drop every member and the head.
    pub fn clear(&mut self) {
        self.members.clear();
        self.head = None;
    }

    /// Run the election over this cluster's members.
    ///
    /// `nodes` is the full node list the member slots point into; slots
    /// past its end are ignored. An empty cluster keeps no head.
    pub fn elect_head<R>(&mut self, nodes: &[Node], center: Position, rng: &mut R) -> Option<Election>
    where
        R: Rng + ?Sized,
    {
        let candidates = self
            .members
            .iter()
            .filter_map(|&slot| nodes.get(slot).map(|node| (slot, node)));
        let election = elect(candidates, center, rng);
        self.head = election.map(|e| e.head);

        if let Some(e) = election {
            debug!(
                cluster = self.id.0,
                head = e.head,
                decided_by = ?e.decided_by,
                "clusterhead elected"
            );
        }
        election
    }
}
