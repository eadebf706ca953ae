//! Static k-d tree over node positions.
//!
//! The tree is an implicit balanced layout: a permutation of point indices
//! where the median of every sub-slice splits it on alternating axes
//! (x at even depth, y at odd depth). Building is O(n log n) on average via
//! `select_nth_unstable_by`; there is no insert or remove. When the node set
//! changes, build a new index.
//!
//! The index knows positions and their slot in the input slice, nothing else.
//! Node metadata is looked up by the caller through that slot.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::Position;

/// Number of splitting axes.
const DIMENSIONS: usize = 2;

/// A read-only spatial index over a fixed set of positions.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    points: Vec<Position>,
    tree: Vec<usize>,
}

impl SpatialIndex {
    /// Build an index over `points`. Query results refer to slots in this slice.
    pub fn build(points: &[Position]) -> Self {
        let points = points.to_vec();
        let mut tree: Vec<usize> = (0..points.len()).collect();
        split(&mut tree, &points, 0);
        Self { points, tree }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position stored at a slot.
    pub fn position(&self, slot: usize) -> Option<Position> {
        self.points.get(slot).copied()
    }

    /// All slots within `radius` of `center`, boundary included, in ascending slot order.
    pub fn within_radius(&self, center: Position, radius: f64) -> Vec<usize> {
        let mut out = Vec::new();
        if radius < 0.0 || !radius.is_finite() {
            return out;
        }
        self.collect_within(0, self.tree.len(), 0, center, radius * radius, &mut out);
        out.sort_unstable();
        out
    }

    /// Up to `k` nearest slots to `point` as `(slot, distance)`, closest first.
    ///
    /// Equal distances are ordered by slot.
    pub fn nearest(&self, point: Position, k: usize) -> Vec<(usize, f64)> {
        if k == 0 {
            return Vec::new();
        }
        let mut heap = BinaryHeap::with_capacity(k + 1);
        self.collect_nearest(0, self.tree.len(), 0, point, k, &mut heap);

        let mut found = heap.into_vec();
        found.sort_unstable();
        found
            .into_iter()
            .map(|c| (c.slot, c.distance_squared.sqrt()))
            .collect()
    }

    fn collect_within(
        &self,
        lo: usize,
        hi: usize,
        depth: usize,
        center: Position,
        radius_squared: f64,
        out: &mut Vec<usize>,
    ) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let slot = self.tree[mid];
        let pivot = self.points[slot];

        if pivot.distance_squared(&center) <= radius_squared {
            out.push(slot);
        }

        // Left holds coordinates <= pivot on this axis, right holds >= pivot.
        let axis = depth % DIMENSIONS;
        let delta = center.axis(axis) - pivot.axis(axis);
        let plane_hit = delta * delta <= radius_squared;

        if delta <= 0.0 || plane_hit {
            self.collect_within(lo, mid, depth + 1, center, radius_squared, out);
        }
        if delta >= 0.0 || plane_hit {
            self.collect_within(mid + 1, hi, depth + 1, center, radius_squared, out);
        }
    }

    fn collect_nearest(
        &self,
        lo: usize,
        hi: usize,
        depth: usize,
        point: Position,
        k: usize,
        heap: &mut BinaryHeap<Candidate>,
    ) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let slot = self.tree[mid];
        let pivot = self.points[slot];

        let candidate = Candidate {
            distance_squared: pivot.distance_squared(&point),
            slot,
        };
        if heap.len() < k {
            heap.push(candidate);
        } else if heap.peek().is_some_and(|worst| candidate < *worst) {
            heap.pop();
            heap.push(candidate);
        }

        let axis = depth % DIMENSIONS;
        let delta = point.axis(axis) - pivot.axis(axis);
        let (near, far) = if delta <= 0.0 {
            ((lo, mid), (mid + 1, hi))
        } else {
            ((mid + 1, hi), (lo, mid))
        };

        self.collect_nearest(near.0, near.1, depth + 1, point, k, heap);

        let must_visit_far = heap.len() < k
            || heap
                .peek()
                .is_some_and(|worst| delta * delta <= worst.distance_squared);
        if must_visit_far {
            self.collect_nearest(far.0, far.1, depth + 1, point, k, heap);
        }
    }
}

/// Arrange `tree` so every sub-slice's median splits on the depth's axis.
fn split(tree: &mut [usize], points: &[Position], depth: usize) {
    if tree.len() <= 1 {
        return;
    }
    let axis = depth % DIMENSIONS;
    let mid = tree.len() / 2;
    tree.select_nth_unstable_by(mid, |&a, &b| {
        points[a]
            .axis(axis)
            .total_cmp(&points[b].axis(axis))
            .then(a.cmp(&b))
    });

    let (left, rest) = tree.split_at_mut(mid);
    split(left, points, depth + 1);
    split(&mut rest[1..], points, depth + 1);
}

/// Heap entry ordered by distance, then slot.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance_squared: f64,
    slot: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_squared
            .total_cmp(&other.distance_squared)
            .then(self.slot.cmp(&other.slot))
    }
}
