//! `foodshed-network` — road network, provider snapping, and reachability.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`        |
//! | [`reach`]   | `ReachSet`, distance-bounded Dijkstra                     |
//! | [`osm`]     | `load_from_pbf`, `RoutingProfile` (feature = `"osm"`)     |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag  | Effect                                                        |
//! |-------|---------------------------------------------------------------|
//! | `osm` | Enables OSM PBF loading and boundary clipping.                |

pub mod error;
pub mod network;
pub mod reach;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use reach::{reachable_within, ReachSet};

#[cfg(feature = "osm")]
pub use osm::{load_from_pbf, RoutingProfile};
