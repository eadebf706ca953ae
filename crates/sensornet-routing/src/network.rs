//! The network aggregate: nodes, cluster grid, and spatial index.
//!
//! All three are built together in one call and never touched afterwards.
//! There is no API to move a node, re-run assignment, or refresh the index
//! on its own; a changed node set goes through [`Network::rebuild`], which
//! consumes the old network so no stale index can be queried.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use sensornet_cluster::{BoundaryPolicy, Cluster, ClusterGrid, GridConfig};
use sensornet_topology::{ClusterId, Node, NodeId, NodeSpec, Position, SpatialIndex};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::router::{RouteOutcome, Router};
use crate::snapshot::{ClusterView, NetworkSnapshot, NodeView};

/// Everything needed to build a network besides the nodes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    /// Plane and cell dimensions
    pub grid: GridConfig,
    /// Where boundary coordinates go
    pub boundary: BoundaryPolicy,
}

/// A frozen sensor network.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    nodes: Vec<Node>,
    slots: HashMap<NodeId, usize>,
    grid: ClusterGrid,
    index: SpatialIndex,
}

impl Network {
    /// Assign clusters, elect heads, and index positions for `nodes`.
    ///
    /// Fails on duplicate ids or on a node outside the grid's plane.
    pub fn build<R>(config: NetworkConfig, mut nodes: Vec<Node>, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let mut slots = HashMap::with_capacity(nodes.len());
        for (slot, node) in nodes.iter().enumerate() {
            if slots.insert(node.id(), slot).is_some() {
                return Err(Error::DuplicateNode(node.id()));
            }
        }

        let mut grid = ClusterGrid::new(config.grid);
        grid.assign(&mut nodes, config.boundary, rng)?;
        let elected = grid.elect_heads(&nodes, rng);

        let positions: Vec<Position> = nodes.iter().map(Node::position).collect();
        let index = SpatialIndex::build(&positions);

        info!(
            nodes = nodes.len(),
            clusters = config.grid.cell_count(),
            occupied = elected.len(),
            boundary = %config.boundary,
            "network built"
        );

        Ok(Self {
            config,
            nodes,
            slots,
            grid,
            index,
        })
    }

    /// Build from raw `(x, y, radius, energy, processing_power)` records.
    ///
    /// Ids are the 0-based ordinal of each record. A record whose position
    /// repeats an earlier one is skipped and its id left unused.
    pub fn from_specs<I, R>(config: NetworkConfig, specs: I, rng: &mut R) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<NodeSpec>,
        R: Rng + ?Sized,
    {
        let plane = config.grid.plane();
        let mut taken = HashSet::new();
        let mut nodes = Vec::new();

        for (ordinal, spec) in specs.into_iter().enumerate() {
            let spec: NodeSpec = spec.into();
            let id = NodeId(ordinal as u32);
            // Adding 0.0 folds -0.0 onto 0.0 so both zeros share a key
            let key = ((spec.position.x + 0.0).to_bits(), (spec.position.y + 0.0).to_bits());
            if !taken.insert(key) {
                warn!(node = %id, position = %spec.position, "duplicate position, node skipped");
                continue;
            }
            nodes.push(spec.into_node(id, &plane)?);
        }

        Self::build(config, nodes, rng)
    }

    /// Replace the node set, rebuilding grid and index together.
    pub fn rebuild<R>(self, nodes: Vec<Node>, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        Self::build(self.config, nodes, rng)
    }

    /// Give the nodes back, dropping grid and index.
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in slot order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub fn grid(&self) -> &ClusterGrid {
        &self.grid
    }

    pub fn clusters(&self) -> &[Cluster] {
        self.grid.clusters()
    }

    pub fn cluster(&self, id: ClusterId) -> Result<&Cluster> {
        Ok(self.grid.cluster(id)?)
    }

    /// Elected head of a cluster.
    pub fn head_of(&self, id: ClusterId) -> Result<Option<&Node>> {
        Ok(self.cluster(id)?.head().and_then(|slot| self.nodes.get(slot)))
    }

    /// Ids of the members of a cluster.
    pub fn members_of(&self, id: ClusterId) -> Result<Vec<NodeId>> {
        Ok(self
            .cluster(id)?
            .members()
            .iter()
            .filter_map(|&slot| self.nodes.get(slot).map(Node::id))
            .collect())
    }

    /// The spatial index over current positions.
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// Other nodes inside `id`'s communication range, by ascending slot.
    pub fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let node = self.node(id).ok_or(Error::UnknownNode(id))?;
        Ok(self
            .index
            .within_radius(node.position(), node.radius())
            .into_iter()
            .map(|slot| self.nodes[slot].id())
            .filter(|&other| other != id)
            .collect())
    }

    /// Up to `k` nodes nearest to a point, closest first.
    pub fn nearest(&self, point: Position, k: usize) -> Vec<(NodeId, f64)> {
        self.index
            .nearest(point, k)
            .into_iter()
            .map(|(slot, d)| (self.nodes[slot].id(), d))
            .collect()
    }

    /// Borrow a router for route queries.
    pub fn router(&self) -> Router<'_> {
        Router::new(&self.nodes, &self.index, &self.slots)
    }

    /// Route a packet greedily from `source` to `destination`.
    pub fn find_route(&self, source: NodeId, destination: NodeId) -> Result<RouteOutcome> {
        self.router().find_route(source, destination)
    }

    /// Read-only copy of nodes and clusters for display or persistence.
    pub fn snapshot(&self) -> NetworkSnapshot {
        let config = self.grid.config();
        let nodes = self.nodes.iter().map(NodeView::from).collect();
        let clusters = self
            .grid
            .clusters()
            .iter()
            .map(|c| ClusterView {
                id: c.id(),
                center: config.center_of(c.id()),
                members: c.members().iter().map(|&s| self.nodes[s].id()).collect(),
                head: c.head().map(|s| self.nodes[s].id()),
            })
            .collect();

        NetworkSnapshot {
            max_coord: config.max_coord(),
            cluster_size: config.cluster_size(),
            boundary: self.config.boundary,
            nodes,
            clusters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sensornet_topology::Plane;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(17)
    }

    fn config() -> NetworkConfig {
        NetworkConfig {
            boundary: BoundaryPolicy::Lower,
            ..NetworkConfig::default()
        }
    }

    #[test]
    fn builds_from_specs() {
        let net = Network::from_specs(
            config(),
            [(0.0, 0.0, 5.0, 50.0, 50.0), (3.0, 4.0, 5.0, 50.0, 50.0), (6.0, 8.0, 5.0, 50.0, 50.0)],
            &mut rng(),
        )
        .unwrap();

        assert_eq!(net.len(), 3);
        assert_eq!(net.clusters().len(), 16);
        assert_eq!(net.index().len(), 3);
        assert_eq!(net.node(NodeId(1)).unwrap().position(), Position::new(3.0, 4.0));
        assert_eq!(net.node(NodeId(1)).unwrap().cluster(), Some(ClusterId(0)));
        // (6, 8) lies in column 1, row 1
        assert_eq!(net.node(NodeId(2)).unwrap().cluster(), Some(ClusterId(5)));
    }

    #[test]
    fn duplicate_positions_are_skipped() {
        let net = Network::from_specs(
            config(),
            [(1.0, 1.0, 2.0, 2.0, 2.0), (1.0, 1.0, 3.0, 3.0, 3.0), (2.0, 2.0, 2.0, 2.0, 2.0)],
            &mut rng(),
        )
        .unwrap();

        let ids: Vec<NodeId> = net.nodes().iter().map(Node::id).collect();
        assert_eq!(ids, vec![NodeId(0), NodeId(2)]);
    }

    #[test]
    fn signed_zeros_are_the_same_position() {
        let net = Network::from_specs(
            config(),
            [(0.0, 0.0, 1.0, 1.0, 1.0), (-0.0, 0.0, 1.0, 1.0, 1.0), (0.0, -0.0, 1.0, 1.0, 1.0)],
            &mut rng(),
        )
        .unwrap();

        assert_eq!(net.len(), 1);
        assert_eq!(net.nodes()[0].id(), NodeId(0));
    }

    #[test]
    fn bad_records_fail_the_build() {
        let err = Network::from_specs(config(), [(1.0, 1.0, -2.0, 2.0, 2.0)], &mut rng()).unwrap_err();
        assert!(matches!(err, Error::Topology(_)));

        let err = Network::from_specs(config(), [(25.0, 1.0, 2.0, 2.0, 2.0)], &mut rng()).unwrap_err();
        assert!(matches!(err, Error::Topology(_)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let plane = Plane::DEFAULT;
        let nodes = vec![
            NodeSpec::new(1.0, 1.0, 1.0, 1.0, 1.0).into_node(NodeId(4), &plane).unwrap(),
            NodeSpec::new(2.0, 2.0, 1.0, 1.0, 1.0).into_node(NodeId(4), &plane).unwrap(),
        ];
        let err = Network::build(config(), nodes, &mut rng()).unwrap_err();
        assert_eq!(err, Error::DuplicateNode(NodeId(4)));
    }

    #[test]
    fn nodes_outside_a_smaller_grid_are_rejected() {
        let small = NetworkConfig {
            grid: GridConfig::new(10.0, 5.0).unwrap(),
            boundary: BoundaryPolicy::Lower,
        };
        let nodes = vec![NodeSpec::new(15.0, 1.0, 1.0, 1.0, 1.0)
            .into_node(NodeId(0), &Plane::DEFAULT)
            .unwrap()];
        let err = Network::build(small, nodes, &mut rng()).unwrap_err();
        assert!(matches!(err, Error::Cluster(_)));
    }

    #[test]
    fn rebuild_replaces_everything() {
        let net = Network::from_specs(
            config(),
            [(1.0, 1.0, 2.0, 2.0, 2.0), (2.0, 2.0, 2.0, 2.0, 2.0)],
            &mut rng(),
        )
        .unwrap();

        let mut nodes = net.into_nodes();
        nodes.push(
            NodeSpec::new(12.0, 12.0, 2.0, 2.0, 2.0)
                .into_node(NodeId(7), &Plane::DEFAULT)
                .unwrap(),
        );
        let net = Network::build(config(), nodes, &mut rng()).unwrap();

        assert_eq!(net.len(), 3);
        assert_eq!(net.index().len(), 3);
        assert_eq!(net.members_of(ClusterId(10)).unwrap(), vec![NodeId(7)]);
        assert_eq!(net.members_of(ClusterId(0)).unwrap().len(), 2);

        let net = net.rebuild(Vec::new(), &mut rng()).unwrap();
        assert!(net.is_empty());
        assert!(net.index().is_empty());
        assert!(net.clusters().iter().all(Cluster::is_empty));
    }

    #[test]
    fn build_overwrites_caller_set_clusters() {
        let mut node = NodeSpec::new(1.0, 1.0, 2.0, 2.0, 2.0)
            .into_node(NodeId(0), &Plane::DEFAULT)
            .unwrap();
        node.set_cluster(ClusterId(15));

        let net = Network::build(config(), vec![node], &mut rng()).unwrap();
        assert_eq!(net.node(NodeId(0)).unwrap().cluster(), Some(ClusterId(0)));
        assert!(net.members_of(ClusterId(15)).unwrap().is_empty());
    }

    #[test]
    fn neighbors_exclude_self() {
        let net = Network::from_specs(
            config(),
            [(0.0, 0.0, 5.0, 1.0, 1.0), (3.0, 4.0, 1.0, 1.0, 1.0), (9.0, 9.0, 1.0, 1.0, 1.0)],
            &mut rng(),
        )
        .unwrap();
        assert_eq!(net.neighbors(NodeId(0)).unwrap(), vec![NodeId(1)]);
        assert!(net.neighbors(NodeId(1)).unwrap().is_empty());
        assert_eq!(net.neighbors(NodeId(5)).unwrap_err(), Error::UnknownNode(NodeId(5)));
    }

    #[test]
    fn nearest_maps_to_ids() {
        let net = Network::from_specs(
            config(),
            [(0.0, 0.0, 1.0, 1.0, 1.0), (3.0, 4.0, 1.0, 1.0, 1.0), (9.0, 9.0, 1.0, 1.0, 1.0)],
            &mut rng(),
        )
        .unwrap();
        let found = net.nearest(Position::new(3.0, 3.0), 2);
        assert_eq!(found[0].0, NodeId(1));
        assert_eq!(found[1].0, NodeId(0));
    }

    #[test]
    fn heads_are_elected_for_occupied_cells() {
        let net = Network::from_specs(
            config(),
            [
                (5.5, 5.5, 4.0, 70.0, 40.0),
                (6.0, 6.0, 3.0, 80.0, 50.0),
                (7.0, 7.0, 2.0, 60.0, 20.0),
                (5.5, 9.0, 3.0, 80.0, 50.0),
            ],
            &mut rng(),
        )
        .unwrap();

        assert_eq!(net.head_of(ClusterId(5)).unwrap().map(Node::id), Some(NodeId(1)));
        assert_eq!(net.head_of(ClusterId(0)).unwrap(), None);
        assert!(net.head_of(ClusterId(99)).is_err());
    }

    #[test]
    fn snapshot_lists_members_and_heads() {
        let net = Network::from_specs(
            config(),
            [(1.0, 1.0, 2.0, 2.0, 2.0), (2.0, 2.0, 2.0, 9.0, 2.0), (18.0, 18.0, 1.0, 1.0, 1.0)],
            &mut rng(),
        )
        .unwrap();
        let snap = net.snapshot();

        assert_eq!(snap.nodes.len(), 3);
        assert_eq!(snap.clusters.len(), 16);
        assert_eq!(snap.clusters[0].members, vec![NodeId(0), NodeId(1)]);
        assert_eq!(snap.clusters[0].head, Some(NodeId(1)));
        assert_eq!(snap.clusters[15].head, Some(NodeId(2)));
        assert_eq!(snap.clusters[15].center, Position::new(17.5, 17.5));
        assert_eq!(snap.occupied().count(), 2);
    }
}
