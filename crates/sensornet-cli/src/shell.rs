//! Interactive simulator session.
//!
//! The shell is generic over its reader and writer so a whole session can
//! be scripted. End of input at any prompt ends the session cleanly.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use rand::rngs::StdRng;
use sensornet_routing::{Error as NetworkError, Network, RouteOutcome};
use sensornet_topology::NodeId;
use tracing::{info, warn};

use crate::config::SimConfig;
use crate::error::Result;
use crate::generate::generate;
use crate::input::read_network_file;
use crate::output::{display_node, save_network, write_json};

/// Where the node set comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read from the configured input file
    User,
    /// Draw within the generator bounds
    Random,
}

/// Whether the session should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu-driven simulator over any line source and sink.
pub struct Shell<R, W> {
    config: SimConfig,
    input: R,
    output: W,
    rng: StdRng,
    json: Option<PathBuf>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(config: SimConfig, input: R, output: W) -> Self {
        let rng = config.rng();
        Self {
            config,
            input,
            output,
            rng,
            json: None,
        }
    }

    /// Also write a JSON snapshot to `path` whenever a network is built.
    pub fn with_json(mut self, path: impl Into<PathBuf>) -> Self {
        self.json = Some(path.into());
        self
    }

    /// Give back the writer, mainly to inspect a scripted session.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run menu rounds until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to WSN Simulation!")?;
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Choose mode of operation:")?;
            writeln!(self.output, "1. User Mode")?;
            writeln!(self.output, "2. Random Mode")?;
            writeln!(self.output, "3. Quit")?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(());
            };
            let mode = match choice.as_str() {
                "1" => Mode::User,
                "2" => Mode::Random,
                "3" => return Ok(()),
                _ => {
                    writeln!(self.output, "Invalid choice, please try again.")?;
                    continue;
                }
            };

            let network = match self.load(mode) {
                Ok(network) => network,
                Err(e) => {
                    warn!(?mode, error = %e, "could not build network");
                    writeln!(self.output, "Error: {}", e)?;
                    continue;
                }
            };

            if self.route_packets(&network)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Build a network for `mode` and save it to the configured outputs.
    pub fn load(&mut self, mode: Mode) -> Result<Network> {
        let specs = match mode {
            Mode::User => read_network_file(&self.config.input)?,
            Mode::Random => generate(
                &self.config.generator,
                self.config.network.grid.plane(),
                &mut self.rng,
            ),
        };
        let network = Network::from_specs(self.config.network, specs, &mut self.rng)?;
        info!(?mode, nodes = network.len(), "network ready");

        let snapshot = network.snapshot();
        save_network(&snapshot, &self.config.output)?;
        if let Some(path) = &self.json {
            write_json(&snapshot, std::fs::File::create(path)?)?;
        }

        writeln!(self.output)?;
        writeln!(self.output, "Number of nodes: {}", network.len())?;
        writeln!(
            self.output,
            "Network saved to {}",
            self.config.output.display()
        )?;
        Ok(network)
    }

    fn route_packets(&mut self, network: &Network) -> Result<Flow> {
        loop {
            writeln!(self.output)?;
            let Some(source) = self.prompt("Enter source node ID: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(destination) = self.prompt("Enter destination node ID: ")? else {
                return Ok(Flow::Exit);
            };

            match (parse_id(&source), parse_id(&destination)) {
                (Some(src), Some(dst)) => self.report_route(network, src, dst)?,
                _ => writeln!(self.output, "Invalid source or destination node.")?,
            }

            let Some(again) = self.prompt("Do you want to route another packet? (y/n): ")? else {
                return Ok(Flow::Exit);
            };
            if !again.eq_ignore_ascii_case("y") {
                return Ok(Flow::Continue);
            }
        }
    }

    fn report_route(&mut self, network: &Network, src: NodeId, dst: NodeId) -> Result<()> {
        match network.find_route(src, dst) {
            Ok(RouteOutcome::Arrived(path)) => {
                let hops: Vec<String> = path.iter().map(|&id| display_node(id).to_string()).collect();
                writeln!(self.output, "Route: {}", hops.join(" -> "))?;
            }
            Ok(RouteOutcome::Stuck { at, .. }) => {
                info!(stuck_at = display_node(at), "no route");
                writeln!(self.output, "No valid route found.")?;
            }
            Err(NetworkError::NetworkTooSmall(_)) => writeln!(
                self.output,
                "Network has less than two nodes in the network. No routing can be performed."
            )?,
            Err(NetworkError::UnknownNode(_)) => {
                writeln!(self.output, "Invalid source or destination node.")?
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// Print `text` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// 1-based id typed by the user.
fn parse_id(raw: &str) -> Option<NodeId> {
    match raw.parse::<u32>() {
        Ok(n) if n >= 1 => Some(NodeId(n - 1)),
        _ => None,
    }
}
