//! Saving a built network.
//!
//! The text layout opens with the same records [`crate::input`] reads, so a
//! saved network can be loaded again as user input. Cluster and node ids
//! are written 1-based.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sensornet_routing::NetworkSnapshot;
use sensornet_topology::{ClusterId, NodeId};

use crate::error::Result;

/// Node id as shown to users.
pub fn display_node(id: NodeId) -> u32 {
    id.0 + 1
}

/// Cluster id as shown to users.
pub fn display_cluster(id: ClusterId) -> usize {
    id.0 + 1
}

/// Write the node records followed by every occupied cluster.
pub fn write_network<W: Write>(snapshot: &NetworkSnapshot, mut out: W) -> Result<()> {
    writeln!(out, "{}", snapshot.nodes.len())?;
    for node in &snapshot.nodes {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            node.position.x, node.position.y, node.radius, node.energy, node.processing_power
        )?;
    }

    for cluster in snapshot.occupied() {
        writeln!(out)?;
        writeln!(out, "Cluster {}:", display_cluster(cluster.id))?;
        let members: Vec<String> = cluster
            .members
            .iter()
            .map(|&id| display_node(id).to_string())
            .collect();
        writeln!(out, "Nodes: {}", members.join(", "))?;
        if let Some(head) = cluster.head {
            writeln!(out, "Clusterhead: {}", display_node(head))?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Write the text layout to `path`, replacing any existing file.
pub fn save_network(snapshot: &NetworkSnapshot, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    write_network(snapshot, BufWriter::new(file))
}

/// Write the snapshot as pretty-printed JSON.
pub fn write_json<W: Write>(snapshot: &NetworkSnapshot, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, snapshot)?;
    writeln!(out)?;
    Ok(())
}
