//! Sensor nodes.
//!
//! A node is created once, validated against the plane, and never changes
//! afterwards except for the cluster it is filed under. Fitness is derived
//! from the three scalar attributes at construction:
//!
//! ```text
//! fitness = 0.4 * radius + 0.4 * energy + 0.2 * processing_power
//! ```

use crate::error::{Error, Result};
use crate::{Plane, Position};

/// Weight of the communication radius in the fitness score.
pub const RADIUS_WEIGHT: f64 = 0.4;

/// Weight of the energy level in the fitness score.
pub const ENERGY_WEIGHT: f64 = 0.4;

/// Weight of the processing power in the fitness score.
pub const PROCESSING_WEIGHT: f64 = 0.2;

/// Caller-assigned node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row-major index of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterId(pub usize);

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fitness score for clusterhead ranking.
#[inline]
pub fn fitness(radius: f64, energy: f64, processing_power: f64) -> f64 {
    RADIUS_WEIGHT * radius + ENERGY_WEIGHT * energy + PROCESSING_WEIGHT * processing_power
}

/// Raw node parameters before an id is attached.
///
/// Mirrors one `x y radius energy processing_power` input record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSpec {
    pub position: Position,
    pub radius: f64,
    pub energy: f64,
    pub processing_power: f64,
}

impl NodeSpec {
    pub const fn new(x: f64, y: f64, radius: f64, energy: f64, processing_power: f64) -> Self {
        Self {
            position: Position::new(x, y),
            radius,
            energy,
            processing_power,
        }
    }

    /// Validate and build a node with the given id.
    pub fn into_node(self, id: NodeId, plane: &Plane) -> Result<Node> {
        Node::new(
            id,
            self.position,
            self.radius,
            self.energy,
            self.processing_power,
            plane,
        )
    }
}

impl From<(f64, f64, f64, f64, f64)> for NodeSpec {
    fn from((x, y, radius, energy, processing_power): (f64, f64, f64, f64, f64)) -> Self {
        Self::new(x, y, radius, energy, processing_power)
    }
}

/// A sensor node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    position: Position,
    radius: f64,
    energy: f64,
    processing_power: f64,
    fitness: f64,
    cluster: Option<ClusterId>,
}

impl Node {
    /// Create a node, rejecting non-positive scalars and off-plane positions.
    pub fn new(
        id: NodeId,
        position: Position,
        radius: f64,
        energy: f64,
        processing_power: f64,
        plane: &Plane,
    ) -> Result<Self> {
        positive("radius", radius)?;
        positive("energy", energy)?;
        positive("processing_power", processing_power)?;
        plane.check(&position)?;

        Ok(Self {
            id,
            position,
            radius,
            energy,
            processing_power,
            fitness: fitness(radius, energy, processing_power),
            cluster: None,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Communication range.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn processing_power(&self) -> f64 {
        self.processing_power
    }

    /// Clusterhead fitness, fixed at construction.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Cluster this node was filed under, if assignment has run.
    pub fn cluster(&self) -> Option<ClusterId> {
        self.cluster
    }

    /// Record the cluster this node belongs to.
    ///
    /// Called by the cluster grid during assignment. Nodes inside a built
    /// network are only reachable through shared references, so their
    /// membership cannot drift from the grid afterwards.
    #[doc(hidden)]
    pub fn set_cluster(&mut self, cluster: ClusterId) {
        self.cluster = Some(cluster);
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        self.position.distance(&other.position)
    }

    /// Whether `other` lies within this node's communication range.
    pub fn reaches(&self, other: &Node) -> bool {
        self.position.distance_squared(&other.position) <= self.radius * self.radius
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plane() -> Plane {
        Plane::new(20.0).unwrap()
    }

    fn node(id: u32, x: f64, y: f64, r: f64, e: f64, p: f64) -> Node {
        Node::new(NodeId(id), Position::new(x, y), r, e, p, &plane()).unwrap()
    }

    #[test]
    fn fitness_is_weighted_sum() {
        let cases = [
            ((4.0, 70.0, 40.0), 37.6),
            ((3.0, 80.0, 50.0), 43.2),
            ((2.0, 60.0, 20.0), 28.8),
        ];
        for ((r, e, p), expected) in cases {
            let n = node(0, 1.0, 1.0, r, e, p);
            assert!(
                (n.fitness() - expected).abs() < 1e-9,
                "fitness({}, {}, {}) = {}, expected {}",
                r,
                e,
                p,
                n.fitness(),
                expected
            );
        }
    }

    #[test]
    fn identical_inputs_have_identical_fitness() {
        let a = node(0, 6.0, 6.0, 3.0, 80.0, 50.0);
        let b = node(1, 5.0, 9.0, 3.0, 80.0, 50.0);
        assert_eq!(a.fitness(), b.fitness());
    }

    #[test]
    fn distances_match_reference_layout() {
        let n0 = node(0, 0.0, 0.0, 5.0, 50.0, 50.0);
        let n1 = node(1, 3.0, 4.0, 5.0, 50.0, 50.0);
        let n2 = node(2, 6.0, 8.0, 5.0, 50.0, 50.0);
        let n3 = node(3, 9.0, 12.0, 5.0, 50.0, 50.0);
        let n4 = node(4, 8.0, 0.0, 5.0, 50.0, 50.0);
        let n5 = node(5, 3.0, 15.0, 5.0, 50.0, 50.0);

        assert_eq!(n0.distance_to(&n1), 5.0);
        assert_eq!(n0.distance_to(&n2), 10.0);
        assert_eq!(n0.distance_to(&n3), 15.0);
        assert_eq!(n0.distance_to(&n4), 8.0);
        assert!((n0.distance_to(&n5) - 15.297_058_54).abs() < 1e-8);
        assert_eq!(n1.distance_to(&n5), 11.0);
    }

    #[test]
    fn reaches_is_inclusive() {
        let a = node(0, 0.0, 0.0, 5.0, 1.0, 1.0);
        let b = node(1, 3.0, 4.0, 1.0, 1.0, 1.0);
        assert!(a.reaches(&b));
        assert!(!b.reaches(&a));
    }

    #[test]
    fn rejects_non_positive_scalars() {
        let p = plane();
        let at = Position::new(1.0, 1.0);
        for (r, e, pp, field) in [
            (0.0, 1.0, 1.0, "radius"),
            (-1.0, 1.0, 1.0, "radius"),
            (1.0, -5.0, 1.0, "energy"),
            (1.0, 1.0, 0.0, "processing_power"),
            (f64::NAN, 1.0, 1.0, "radius"),
        ] {
            let err = Node::new(NodeId(0), at, r, e, pp, &p).unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter { field: f, .. } if f == field),
                "expected {} error, got {:?}",
                field,
                err
            );
        }
    }

    #[test]
    fn rejects_out_of_bounds() {
        let err = Node::new(NodeId(0), Position::new(21.0, 0.0), 1.0, 1.0, 1.0, &plane())
            .unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }

    #[test]
    fn cluster_starts_unassigned() {
        let mut n = node(0, 1.0, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(n.cluster(), None);
        n.set_cluster(ClusterId(3));
        assert_eq!(n.cluster(), Some(ClusterId(3)));
    }

    #[test]
    fn spec_builds_node() {
        let spec = NodeSpec::from((2.0, 3.0, 4.0, 5.0, 6.0));
        let n = spec.into_node(NodeId(9), &plane()).unwrap();
        assert_eq!(n.id(), NodeId(9));
        assert_eq!(n.position(), Position::new(2.0, 3.0));
        assert_eq!(n.radius(), 4.0);
    }

    fn coord() -> impl Strategy<Value = f64> {
        0.0..=20.0f64
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(ax in coord(), ay in coord(), bx in coord(), by in coord()) {
            let a = node(0, ax, ay, 1.0, 1.0, 1.0);
            let b = node(1, bx, by, 1.0, 1.0, 1.0);
            prop_assert_eq!(a.distance_to(&b), b.distance_to(&a));
            prop_assert!(a.distance_to(&b) >= 0.0);
        }

        #[test]
        fn distance_obeys_triangle_inequality(
            ax in coord(), ay in coord(),
            bx in coord(), by in coord(),
            cx in coord(), cy in coord(),
        ) {
            let a = node(0, ax, ay, 1.0, 1.0, 1.0);
            let b = node(1, bx, by, 1.0, 1.0, 1.0);
            let c = node(2, cx, cy, 1.0, 1.0, 1.0);
            prop_assert!(a.distance_to(&c) <= a.distance_to(&b) + b.distance_to(&c) + 1e-9);
        }
    }
}
