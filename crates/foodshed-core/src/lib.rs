//! `foodshed-core` — foundational types for the foodshed mapping toolkit.
//!
//! This crate is a dependency of every other `foodshed-*` crate.  It
//! intentionally has no `foodshed-*` dependencies and minimal external ones
//! (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`                                   |
//! | [`geo`]      | `GeoPoint`, haversine distance, `LocalProjection`    |
//! | [`mode`]     | `TravelMode` enum                                    |
//! | [`distance`] | `DistanceBand` (tenth-of-a-mile bands)               |
//! | [`error`]    | `CoreError`, `CoreResult`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod distance;
pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use distance::DistanceBand;
pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, LocalProjection, MILES_TO_METERS};
pub use ids::{EdgeId, NodeId};
pub use mode::TravelMode;
