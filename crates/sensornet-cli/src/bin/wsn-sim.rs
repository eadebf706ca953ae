//! wsn-sim binary
//!
//! Interactive wireless sensor network simulator.
//!
//! Usage:
//!   wsn-sim [--json <path>]
//!
//! Settings come from `WSN_*` environment variables; see `SimConfig`.

use std::io;

use sensornet_cli::{Shell, SimConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_usage() {
    eprintln!("wsn-sim - Wireless sensor network routing simulator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  wsn-sim [--json <path>]   Run the interactive simulator");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WSN_INPUT           Node file for user mode (default: input.txt)");
    eprintln!("  WSN_OUTPUT          Where the network is saved (default: network.txt)");
    eprintln!("  WSN_SEED            Fixed RNG seed");
    eprintln!("  WSN_BOUNDARY        random | lower | higher (default: random)");
    eprintln!("  WSN_MAX_COORD       Plane side length (default: 20)");
    eprintln!("  WSN_CLUSTER_SIZE    Cell side length (default: 5)");
    eprintln!("  WSN_MIN_NODES       Random mode minimum node count (default: 10)");
    eprintln!("  WSN_MAX_NODES       Random mode maximum node count (default: 100)");
    eprintln!("  WSN_MAX_RADIUS      Random mode maximum radius (default: 8)");
    eprintln!("  WSN_MAX_ENERGY      Random mode maximum energy (default: 100)");
    eprintln!("  WSN_MAX_PROCESSING  Random mode maximum processing power (default: 100)");
    eprintln!("  RUST_LOG            Log filter (default: wsn_sim=info,sensornet=info)");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    let json = match args.get(1).map(String::as_str) {
        None => None,
        Some("--json") => match args.get(2) {
            Some(path) => Some(path.clone()),
            None => {
                eprintln!("Error: --json requires a path argument");
                std::process::exit(1);
            }
        },
        Some("-h") | Some("--help") => {
            print_usage();
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown argument: {}", other);
            print_usage();
            std::process::exit(1);
        }
    };

    // Logs go to stderr so they don't interleave with prompts
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wsn_sim=info,sensornet=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = SimConfig::from_env()?;
    tracing::info!(
        input = %config.input.display(),
        output = %config.output.display(),
        boundary = %config.network.boundary,
        seed = ?config.seed,
        "Starting wsn-sim"
    );

    let stdin = io::stdin();
    let mut shell = Shell::new(config, stdin.lock(), io::stdout());
    if let Some(path) = json {
        shell = shell.with_json(path);
    }
    shell.run()?;

    Ok(())
}
