//! Clusterhead election.
//!
//! Three stages, each narrowing the candidate set:
//!
//! 1. highest fitness (exact equality, fitness is a pure function of inputs)
//! 2. smallest distance to the cell center
//! 3. uniform random choice among whoever is still tied
//!
//! Stages 2 and 3 must not collapse into a `(fitness, -distance)` sort key:
//! that picks the first of several tied nodes instead of drawing one.

use rand::seq::SliceRandom;
use rand::Rng;
use sensornet_topology::{Node, Position};

/// Which stage settled an election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecidedBy {
    /// A single node had the highest fitness.
    Fitness,
    /// Fitness tied; one node was closest to the center.
    Proximity,
    /// Fitness and proximity tied; drawn at random.
    Random,
}

/// Result of one election.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Election {
    /// Slot of the elected node in the network's node list
    pub head: usize,
    /// Stage that produced the winner
    pub decided_by: DecidedBy,
}

/// Elect a head among `(slot, node)` candidates.
///
/// Returns `None` when there are no candidates.
pub fn elect<'a, I, R>(candidates: I, center: Position, rng: &mut R) -> Option<Election>
where
    I: IntoIterator<Item = (usize, &'a Node)>,
    R: Rng + ?Sized,
{
    let candidates: Vec<(usize, &Node)> = candidates.into_iter().collect();
    if candidates.is_empty() {
        return None;
    }

    let best_fitness = candidates
        .iter()
        .map(|(_, n)| n.fitness())
        .fold(f64::NEG_INFINITY, f64::max);
    let fittest: Vec<(usize, &Node)> = candidates
        .into_iter()
        .filter(|(_, n)| n.fitness() == best_fitness)
        .collect();

    if let [(head, _)] = fittest[..] {
        return Some(Election {
            head,
            decided_by: DecidedBy::Fitness,
        });
    }

    let closest_distance = fittest
        .iter()
        .map(|(_, n)| n.position().distance(&center))
        .fold(f64::INFINITY, f64::min);
    let closest: Vec<usize> = fittest
        .iter()
        .filter(|(_, n)| n.position().distance(&center) == closest_distance)
        .map(|&(slot, _)| slot)
        .collect();

    if let [head] = closest[..] {
        return Some(Election {
            head,
            decided_by: DecidedBy::Proximity,
        });
    }

    let head = *closest.choose(rng)?;
    Some(Election {
        head,
        decided_by: DecidedBy::Random,
    })
}
