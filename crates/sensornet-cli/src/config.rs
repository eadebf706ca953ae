//! Simulator configuration from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sensornet_cluster::{BoundaryPolicy, GridConfig, DEFAULT_CLUSTER_SIZE, DEFAULT_MAX_COORD};
use sensornet_routing::NetworkConfig;

use crate::error::{Error, Result};
use crate::generate::GeneratorConfig;

/// Settings for one simulator session.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Plane, cell size, and boundary handling
    pub network: NetworkConfig,
    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Node file read in user mode
    pub input: PathBuf,
    /// Where the built network is saved
    pub output: PathBuf,
    /// Bounds for random mode
    pub generator: GeneratorConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            seed: None,
            input: PathBuf::from("input.txt"),
            output: PathBuf::from("network.txt"),
            generator: GeneratorConfig::default(),
        }
    }
}

impl SimConfig {
    /// Read `WSN_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_coord = parse_or(&lookup, "WSN_MAX_COORD", DEFAULT_MAX_COORD)?;
        let cluster_size = parse_or(&lookup, "WSN_CLUSTER_SIZE", DEFAULT_CLUSTER_SIZE)?;
        let grid = GridConfig::new(max_coord, cluster_size).map_err(|e| {
            // Blame the cell size only when it is bad on its own or was the sole override
            let cell_bad = !cluster_size.is_finite() || cluster_size <= 0.0;
            let var = if cell_bad || lookup("WSN_MAX_COORD").is_none() {
                "WSN_CLUSTER_SIZE"
            } else {
                "WSN_MAX_COORD"
            };
            Error::Config {
                var,
                value: e.to_string(),
            }
        })?;
        let boundary = parse_or(&lookup, "WSN_BOUNDARY", BoundaryPolicy::default())?;

        let seed = match lookup("WSN_SEED") {
            Some(raw) => Some(parse("WSN_SEED", &raw)?),
            None => None,
        };

        let input = lookup("WSN_INPUT").map(PathBuf::from).unwrap_or(defaults.input);
        let output = lookup("WSN_OUTPUT").map(PathBuf::from).unwrap_or(defaults.output);

        let g = defaults.generator;
        let generator = GeneratorConfig {
            min_nodes: parse_or(&lookup, "WSN_MIN_NODES", g.min_nodes)?,
            max_nodes: parse_or(&lookup, "WSN_MAX_NODES", g.max_nodes)?,
            max_radius: parse_or(&lookup, "WSN_MAX_RADIUS", g.max_radius)?,
            max_energy: parse_or(&lookup, "WSN_MAX_ENERGY", g.max_energy)?,
            max_processing: parse_or(&lookup, "WSN_MAX_PROCESSING", g.max_processing)?,
        };
        if generator.min_nodes > generator.max_nodes {
            return Err(Error::Config {
                var: "WSN_MIN_NODES",
                value: format!("{} exceeds WSN_MAX_NODES {}", generator.min_nodes, generator.max_nodes),
            });
        }

        Ok(Self {
            network: NetworkConfig { grid, boundary },
            seed,
            input,
            output,
            generator,
        })
    }

    /// RNG for this session, reproducible when a seed is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn parse<T: FromStr>(var: &'static str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| Error::Config {
        var,
        value: raw.to_string(),
    })
}

fn parse_or<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => parse(var, &raw),
        None => Ok(default),
    }
}
