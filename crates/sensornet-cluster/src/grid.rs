//! Fixed square grid of clusters over the plane.
//!
//! The plane `[0, max_coord]²` is cut into `width x width` square cells of
//! side `cluster_size`, numbered row-major from the origin:
//!
//! ```text
//! cluster_id = row * width + col
//! ```
//!
//! A coordinate maps to a cell by floor division, with two corrections:
//!
//! - the outer edge (`v == max_coord`) folds back into the last cell
//! - an interior cell boundary (`v` a multiple of `cluster_size`, not `0`
//!   and not `max_coord`) goes to the lower or higher neighbor according
//!   to the configured [`BoundaryPolicy`]

use std::str::FromStr;

use rand::Rng;
use sensornet_topology::{ClusterId, Node, Plane, Position};
use tracing::debug;

use crate::cluster::Cluster;
use crate::election::Election;
use crate::error::{Error, Result};

/// Default side length of the plane.
pub const DEFAULT_MAX_COORD: f64 = 20.0;

/// Default side length of a cluster cell.
pub const DEFAULT_CLUSTER_SIZE: f64 = 5.0;

/// Most cells per row; bounds the grid at about a million clusters.
pub const MAX_GRID_WIDTH: usize = 1024;

/// Where a coordinate lying exactly on an interior cell boundary goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BoundaryPolicy {
    /// Fair coin between the two adjacent cells.
    #[default]
    Random,
    /// Always the cell below / to the left.
    Lower,
    /// Always the cell above / to the right.
    Higher,
}

impl BoundaryPolicy {
    /// Decide one boundary coordinate. `true` means the lower cell.
    fn picks_lower<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.gen_bool(0.5),
            Self::Lower => true,
            Self::Higher => false,
        }
    }
}

impl FromStr for BoundaryPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "lower" | "down" => Ok(Self::Lower),
            "higher" | "up" => Ok(Self::Higher),
            other => Err(Error::InvalidPolicy(other.to_string())),
        }
    }
}

impl std::fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Random => "random",
            Self::Lower => "lower",
            Self::Higher => "higher",
        };
        f.write_str(name)
    }
}

/// Plane and cell dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    plane: Plane,
    cluster_size: f64,
    width: usize,
}

impl Default for GridConfig {
    /// 20 x 20 plane in 5 x 5 cells: a 4 x 4 grid of 16 clusters.
    fn default() -> Self {
        Self {
            plane: Plane::DEFAULT,
            cluster_size: DEFAULT_CLUSTER_SIZE,
            width: 4,
        }
    }
}

impl GridConfig {
    /// Validate dimensions. `max_coord` must be an exact positive multiple of
    /// `cluster_size`, at most [`MAX_GRID_WIDTH`] cells per row.
    pub fn new(max_coord: f64, cluster_size: f64) -> Result<Self> {
        let invalid = || Error::InvalidGrid {
            max_coord,
            cluster_size,
        };
        if !cluster_size.is_finite() || cluster_size <= 0.0 {
            return Err(invalid());
        }
        let plane = Plane::new(max_coord).map_err(|_| invalid())?;

        let cells = (max_coord / cluster_size).round();
        if cells < 1.0 || cells > MAX_GRID_WIDTH as f64 || cells * cluster_size != max_coord {
            return Err(invalid());
        }

        Ok(Self {
            plane,
            cluster_size,
            width: cells as usize,
        })
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn max_coord(&self) -> f64 {
        self.plane.side()
    }

    pub fn cluster_size(&self) -> f64 {
        self.cluster_size
    }

    /// Cells per row (and per column).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells, `width²`.
    pub fn cell_count(&self) -> usize {
        self.width * self.width
    }

    /// Geometric center of a cell.
    pub fn center_of(&self, id: ClusterId) -> Position {
        let col = id.0 % self.width;
        let row = id.0 / self.width;
        let half = self.cluster_size / 2.0;
        Position::new(
            col as f64 * self.cluster_size + half,
            row as f64 * self.cluster_size + half,
        )
    }

    /// Row or column index for one coordinate in `[0, max_coord]`.
    pub fn axis_cell<R>(&self, value: f64, policy: BoundaryPolicy, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        let last = self.width - 1;
        if value >= self.max_coord() {
            return last;
        }
        if value <= 0.0 {
            return 0;
        }

        let cell = ((value / self.cluster_size).floor() as usize).min(last);
        let on_boundary = value.rem_euclid(self.cluster_size) == 0.0;
        if on_boundary && cell > 0 && policy.picks_lower(rng) {
            cell - 1
        } else {
            cell
        }
    }

    /// Cell that owns a position.
    pub fn cell_of<R>(&self, position: Position, policy: BoundaryPolicy, rng: &mut R) -> ClusterId
    where
        R: Rng + ?Sized,
    {
        let col = self.axis_cell(position.x, policy, rng);
        let row = self.axis_cell(position.y, policy, rng);
        ClusterId(row * self.width + col)
    }
}

/// The full set of clusters covering the plane.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterGrid {
    config: GridConfig,
    clusters: Vec<Cluster>,
}

impl ClusterGrid {
    /// Create `width²` empty clusters.
    pub fn new(config: GridConfig) -> Self {
        let clusters = (0..config.cell_count())
            .map(|i| Cluster::new(ClusterId(i)))
            .collect();
        Self { config, clusters }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// All clusters in row-major order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster(&self, id: ClusterId) -> Result<&Cluster> {
        self.clusters.get(id.0).ok_or(Error::UnknownCluster(id))
    }

    /// Geometric center of a cluster.
    pub fn center_of(&self, id: ClusterId) -> Result<Position> {
        self.cluster(id).map(|c| self.config.center_of(c.id()))
    }

    /// File every node under exactly one cluster.
    ///
    /// Clears all previous membership first. Every position is checked
    /// against the plane before anything is touched, so a failure leaves
    /// the grid unchanged.
    pub fn assign<R>(&mut self, nodes: &mut [Node], policy: BoundaryPolicy, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        let plane = self.config.plane();
        for node in nodes.iter() {
            plane.check(&node.position())?;
        }

        for cluster in &mut self.clusters {
            cluster.clear();
        }

        for (slot, node) in nodes.iter_mut().enumerate() {
            let position = node.position();
            let id = self.config.cell_of(position, policy, rng);
            debug!(
                node = %node.id(),
                x = position.x,
                y = position.y,
                cluster = id.0,
                "node assigned to cluster"
            );
            node.set_cluster(id);
            self.clusters[id.0].add_member(slot);
        }
        Ok(())
    }

    /// Elect a head in every non-empty cluster.
    pub fn elect_heads<R>(&mut self, nodes: &[Node], rng: &mut R) -> Vec<(ClusterId, Election)>
    where
        R: Rng + ?Sized,
    {
        let config = self.config;
        self.clusters
            .iter_mut()
            .filter(|c| !c.is_empty())
            .filter_map(|c| {
                let center = config.center_of(c.id());
                c.elect_head(nodes, center, rng).map(|e| (c.id(), e))
            })
            .collect()
    }
}
