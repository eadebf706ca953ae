//! Sensornet Topology
//!
//! Geometry for a wireless sensor field: a bounded square plane, sensor
//! nodes with a communication radius, and a static k-d tree for neighbor
//! queries.
//!
//! # Nodes
//!
//! Every node carries three positive scalars (radius, energy, processing
//! power) and a derived fitness score used for clusterhead election.
//! Construction validates everything up front; nothing is clamped.
//!
//! # Spatial Index
//!
//! [`SpatialIndex`] is built once from a slice of positions and answers
//! radius and k-nearest queries by slot. It has no mutation API: a changed
//! node set means a new index.

mod error;
mod node;
mod position;
mod spatial;

pub use error::{Error, Result};
pub use node::{fitness, ClusterId, Node, NodeId, NodeSpec, ENERGY_WEIGHT, PROCESSING_WEIGHT, RADIUS_WEIGHT};
pub use position::{Plane, Position};
pub use spatial::SpatialIndex;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitness_weights_sum_to_one() {
        assert!((RADIUS_WEIGHT + ENERGY_WEIGHT + PROCESSING_WEIGHT - 1.0).abs() < 1e-12);
    }

    #[test]
    fn index_slots_line_up_with_nodes() {
        let plane = Plane::new(20.0).unwrap();
        let nodes: Vec<Node> = [(1.0, 1.0), (4.0, 5.0), (18.0, 2.0)]
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                NodeSpec::new(x, y, 5.0, 10.0, 10.0)
                    .into_node(NodeId(i as u32 + 100), &plane)
                    .unwrap()
            })
            .collect();
        let positions: Vec<Position> = nodes.iter().map(Node::position).collect();
        let index = SpatialIndex::build(&positions);

        let hits = index.within_radius(nodes[0].position(), nodes[0].radius());
        let ids: Vec<NodeId> = hits.iter().map(|&s| nodes[s].id()).collect();
        assert_eq!(ids, vec![NodeId(100), NodeId(101)]);
    }
}
