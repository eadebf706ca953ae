//! Sensornet Routing
//!
//! The network aggregate and greedy packet forwarding.
//!
//! # Network
//!
//! [`Network`] owns the node list, the cluster grid, and the spatial index,
//! and builds all three in one step: assign every node to a cell, elect a
//! head per occupied cell, then index positions. It is frozen afterwards.
//!
//! # Routing
//!
//! [`Network::find_route`] forwards a conceptual packet hop by hop using
//! only range-limited neighbor information. Each hop moves to the unvisited
//! in-range node closest to the destination, or straight to the
//! destination when it is in range. A walk with no unvisited neighbor left
//! ends as [`RouteOutcome::Stuck`], an ordinary result rather than an error.
//!
//! ```
//! use rand::SeedableRng;
//! use sensornet_routing::{Network, NetworkConfig};
//! use sensornet_topology::NodeId;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let net = Network::from_specs(
//!     NetworkConfig::default(),
//!     [(0.0, 0.0, 5.0, 50.0, 50.0), (3.0, 4.0, 5.0, 50.0, 50.0), (6.0, 8.0, 5.0, 50.0, 50.0)],
//!     &mut rng,
//! )?;
//!
//! let route = net.find_route(NodeId(0), NodeId(2))?;
//! assert_eq!(route.into_path(), vec![NodeId(0), NodeId(1), NodeId(2)]);
//! # Ok::<(), sensornet_routing::Error>(())
//! ```

mod error;
mod network;
mod router;
mod snapshot;

pub use error::{Error, Result};
pub use network::{Network, NetworkConfig};
pub use router::{Forwarding, RouteOutcome, RouteState, Router};
pub use snapshot::{ClusterView, NetworkSnapshot, NodeView};
