//! Network input files.
//!
//! ```text
//! 3
//! 0 0 5 50 50
//! 3 4 5 50 50
//! 6 8 5 50 50
//! ```
//!
//! The first non-blank line is the node count, followed by one
//! `x y radius energy processing_power` record per node. Blank lines are
//! ignored; anything after the last record is not read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sensornet_topology::NodeSpec;

use crate::error::{Error, Result};

/// Fields per node record.
const FIELDS: usize = 5;

/// Parse node records from a reader.
pub fn parse_network<R: BufRead>(reader: R) -> Result<Vec<NodeSpec>> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)))
        .filter(|line| !matches!(line, Ok((_, l)) if l.trim().is_empty()));

    let (line_no, header) = match lines.next() {
        Some(line) => line?,
        None => return Err(Error::Truncated { expected: 1, found: 0 }),
    };
    let expected: usize = header.trim().parse().map_err(|_| Error::Parse {
        line: line_no,
        message: format!("expected a node count, found {:?}", header.trim()),
    })?;

    let mut specs = Vec::with_capacity(expected);
    while specs.len() < expected {
        let Some(line) = lines.next() else {
            return Err(Error::Truncated {
                expected,
                found: specs.len(),
            });
        };
        let (line_no, text) = line?;
        specs.push(parse_record(line_no, &text)?);
    }
    Ok(specs)
}

/// Read node records from a file.
pub fn read_network_file(path: impl AsRef<Path>) -> Result<Vec<NodeSpec>> {
    let file = File::open(path)?;
    parse_network(BufReader::new(file))
}

fn parse_record(line: usize, text: &str) -> Result<NodeSpec> {
    let values = text
        .split_whitespace()
        .map(|field| {
            field.parse::<f64>().map_err(|_| Error::Parse {
                line,
                message: format!("{:?} is not a number", field),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    match values[..] {
        [x, y, radius, energy, processing] => Ok(NodeSpec::new(x, y, radius, energy, processing)),
        _ => Err(Error::Parse {
            line,
            message: format!("expected {} fields, found {}", FIELDS, values.len()),
        }),
    }
}
