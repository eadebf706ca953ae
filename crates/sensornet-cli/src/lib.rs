//! Sensornet CLI
//!
//! The `wsn-sim` simulator: configuration from `WSN_*` environment
//! variables, network input files, random network generation, saving, and
//! the interactive routing shell.
//!
//! Node and cluster ids are 0-based inside the library crates and 1-based
//! everywhere a user sees or types them.

pub mod config;
pub mod error;
pub mod generate;
pub mod input;
pub mod output;
pub mod shell;

pub use config::SimConfig;
pub use error::{Error, Result};
pub use generate::{generate, GeneratorConfig};
pub use input::{parse_network, read_network_file};
pub use output::{display_cluster, display_node, save_network, write_json, write_network};
pub use shell::{Mode, Shell};
