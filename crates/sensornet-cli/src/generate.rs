//! Random network generation.
//!
//! Positions are whole-number coordinates on the plane; a position already
//! taken is redrawn until a free one comes up.

use std::collections::HashSet;

use rand::Rng;
use sensornet_topology::{NodeSpec, Plane};
use tracing::{debug, warn};

/// Bounds for randomly generated networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Fewest nodes to generate
    pub min_nodes: usize,
    /// Most nodes to generate
    pub max_nodes: usize,
    /// Largest communication radius (smallest is 1)
    pub max_radius: u32,
    /// Largest energy level (smallest is 1)
    pub max_energy: u32,
    /// Largest processing power (smallest is 1)
    pub max_processing: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_nodes: 10,
            max_nodes: 100,
            max_radius: 8,
            max_energy: 100,
            max_processing: 100,
        }
    }
}

/// Draw a random set of node records for `plane`.
///
/// The node count is uniform in `[min_nodes, max_nodes]`, capped at the
/// number of distinct whole-number positions the plane holds.
pub fn generate<R>(config: &GeneratorConfig, plane: Plane, rng: &mut R) -> Vec<NodeSpec>
where
    R: Rng + ?Sized,
{
    let side = plane.side().floor() as u32;
    let capacity = (side as usize + 1).pow(2);
    let wanted = rng.gen_range(config.min_nodes..=config.max_nodes.max(config.min_nodes));
    let count = if wanted > capacity {
        warn!(wanted, capacity, "plane too small for requested node count, capping");
        capacity
    } else {
        wanted
    };

    let mut taken = HashSet::with_capacity(count);
    let mut specs = Vec::with_capacity(count);
    while specs.len() < count {
        let x = rng.gen_range(0..=side);
        let y = rng.gen_range(0..=side);
        if !taken.insert((x, y)) {
            debug!(x, y, "position already taken, regenerating");
            continue;
        }

        let radius = rng.gen_range(1..=config.max_radius.max(1));
        let energy = rng.gen_range(1..=config.max_energy.max(1));
        let processing = rng.gen_range(1..=config.max_processing.max(1));
        debug!(
            node = specs.len(),
            x, y, radius, energy, processing, "node generated"
        );
        specs.push(NodeSpec::new(
            x as f64,
            y as f64,
            radius as f64,
            energy as f64,
            processing as f64,
        ));
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn count_and_ranges_respected() {
        let config = GeneratorConfig::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let specs = generate(&config, Plane::DEFAULT, &mut rng);
            assert!((10..=100).contains(&specs.len()));
            for s in &specs {
                assert!((0.0..=20.0).contains(&s.position.x));
                assert!((0.0..=20.0).contains(&s.position.y));
                assert!((1.0..=8.0).contains(&s.radius));
                assert!((1.0..=100.0).contains(&s.energy));
                assert!((1.0..=100.0).contains(&s.processing_power));
            }
        }
    }

    #[test]
    fn positions_are_unique() {
        let config = GeneratorConfig {
            min_nodes: 100,
            max_nodes: 100,
            ..GeneratorConfig::default()
        };
        let specs = generate(&config, Plane::DEFAULT, &mut StdRng::seed_from_u64(9));
        let positions: HashSet<(u64, u64)> = specs
            .iter()
            .map(|s| (s.position.x.to_bits(), s.position.y.to_bits()))
            .collect();
        assert_eq!(positions.len(), 100);
    }

    #[test]
    fn small_plane_caps_count() {
        let config = GeneratorConfig {
            min_nodes: 50,
            max_nodes: 50,
            ..GeneratorConfig::default()
        };
        let plane = Plane::new(2.0).unwrap();
        let specs = generate(&config, plane, &mut StdRng::seed_from_u64(1));
        assert_eq!(specs.len(), 9);
    }

    #[test]
    fn same_seed_same_network() {
        let config = GeneratorConfig::default();
        let a = generate(&config, Plane::DEFAULT, &mut StdRng::seed_from_u64(4));
        let b = generate(&config, Plane::DEFAULT, &mut StdRng::seed_from_u64(4));
        assert_eq!(a, b);
    }
}
