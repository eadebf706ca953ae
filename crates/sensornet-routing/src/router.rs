//! Greedy range-limited forwarding.
//!
//! A packet sits at one node at a time. Each hop asks the spatial index for
//! every node inside the current node's radius:
//!
//! - destination in range: deliver it, done
//! - otherwise drop the current node and anything already visited, and move
//!   to the remaining node closest to the destination (ties: lowest id)
//! - nothing left: stuck
//!
//! There is no backtracking. The visited set grows by one every hop, so a
//! route over `n` nodes ends after at most `n` hops.

use std::collections::{HashMap, HashSet};

use sensornet_topology::{Node, NodeId, SpatialIndex};
use tracing::debug;

use crate::error::{Error, Result};

/// Where a forwarding run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteState {
    /// Holding the packet at this node, ready to advance.
    At(NodeId),
    /// Delivered to the destination.
    Arrived,
    /// No unvisited neighbor in range of this node.
    Stuck(NodeId),
}

impl RouteState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::At(_))
    }
}

/// Final result of a route query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Full path, source and destination included.
    Arrived(Vec<NodeId>),
    /// Forwarding stopped at `at` after walking `path`.
    Stuck { path: Vec<NodeId>, at: NodeId },
}

impl RouteOutcome {
    pub fn is_arrived(&self) -> bool {
        matches!(self, Self::Arrived(_))
    }

    /// The delivered path, if any.
    pub fn path(&self) -> Option<&[NodeId]> {
        match self {
            Self::Arrived(path) => Some(path),
            Self::Stuck { .. } => None,
        }
    }

    /// The delivered path, or an empty vector when no route was found.
    pub fn into_path(self) -> Vec<NodeId> {
        match self {
            Self::Arrived(path) => path,
            Self::Stuck { .. } => Vec::new(),
        }
    }

    /// Number of hops taken on a delivered path.
    pub fn hops(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }
}

/// Read-only view used to answer route queries against a frozen network.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    nodes: &'a [Node],
    index: &'a SpatialIndex,
    slots: &'a HashMap<NodeId, usize>,
}

impl<'a> Router<'a> {
    pub(crate) fn new(
        nodes: &'a [Node],
        index: &'a SpatialIndex,
        slots: &'a HashMap<NodeId, usize>,
    ) -> Self {
        Self {
            nodes,
            index,
            slots,
        }
    }

    /// Start a step-by-step forwarding run.
    pub fn start(&self, source: NodeId, destination: NodeId) -> Result<Forwarding<'a>> {
        if self.nodes.len() < 2 {
            return Err(Error::NetworkTooSmall(self.nodes.len()));
        }
        let source_slot = self.slot(source)?;
        let destination_slot = self.slot(destination)?;
        Ok(Forwarding::new(*self, source_slot, destination_slot))
    }

    /// Route a packet from `source` to `destination`.
    pub fn find_route(&self, source: NodeId, destination: NodeId) -> Result<RouteOutcome> {
        Ok(self.start(source, destination)?.run())
    }

    fn slot(&self, id: NodeId) -> Result<usize> {
        self.slots.get(&id).copied().ok_or(Error::UnknownNode(id))
    }
}

/// One forwarding run, advanced a hop at a time.
#[derive(Debug, Clone)]
pub struct Forwarding<'a> {
    router: Router<'a>,
    current: usize,
    destination: usize,
    visited: HashSet<usize>,
    path: Vec<usize>,
    state: RouteState,
}

impl<'a> Forwarding<'a> {
    fn new(router: Router<'a>, source: usize, destination: usize) -> Self {
        let state = RouteState::At(router.nodes[source].id());
        Self {
            router,
            current: source,
            destination,
            visited: HashSet::new(),
            path: vec![source],
            state,
        }
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    /// Ids walked so far, source first.
    pub fn path(&self) -> Vec<NodeId> {
        self.ids(&self.path)
    }

    /// Take one hop. Terminal states are sticky.
    pub fn advance(&mut self) -> RouteState {
        if self.state.is_terminal() {
            return self.state;
        }
        if self.current == self.destination {
            self.state = RouteState::Arrived;
            return self.state;
        }

        let nodes = self.router.nodes;
        let here = &nodes[self.current];
        let target = &nodes[self.destination];
        self.visited.insert(self.current);

        let in_range = self.router.index.within_radius(here.position(), here.radius());
        debug!(
            node = %here.id(),
            neighbors = ?self.ids(&in_range),
            "neighbors within range"
        );

        if in_range.contains(&self.destination) {
            debug!(node = %here.id(), destination = %target.id(), "destination within range");
            self.step_to(self.destination);
            self.state = RouteState::Arrived;
            return self.state;
        }

        let next = in_range
            .into_iter()
            .filter(|slot| !self.visited.contains(slot))
            .min_by(|&a, &b| {
                nodes[a]
                    .distance_to(target)
                    .total_cmp(&nodes[b].distance_to(target))
                    .then(nodes[a].id().cmp(&nodes[b].id()))
            });

        self.state = match next {
            Some(slot) => {
                debug!(from = %here.id(), to = %nodes[slot].id(), "closest unvisited node to destination");
                self.step_to(slot);
                RouteState::At(nodes[slot].id())
            }
            None => {
                debug!(node = %here.id(), "no unvisited neighbor in range");
                RouteState::Stuck(here.id())
            }
        };
        self.state
    }

    /// Advance until a terminal state and report the outcome.
    pub fn run(mut self) -> RouteOutcome {
        loop {
            match self.advance() {
                RouteState::At(_) => continue,
                RouteState::Arrived => return RouteOutcome::Arrived(self.path()),
                RouteState::Stuck(at) => {
                    return RouteOutcome::Stuck {
                        path: self.path(),
                        at,
                    }
                }
            }
        }
    }

    fn step_to(&mut self, slot: usize) {
        self.path.push(slot);
        self.current = slot;
    }

    fn ids(&self, slots: &[usize]) -> Vec<NodeId> {
        slots.iter().map(|&s| self.router.nodes[s].id()).collect()
    }
}
