//! `foodshed-data` — read-only input loading.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`providers`] | Provider CSV loader, `Provider`, GeoJSON conversion    |
//! | [`overlays`]  | Boundary polygon and raw overlay GeoJSON loaders       |
//! | [`error`]     | `DataError`, `DataResult<T>`                           |
//!
//! All inputs are loaded once per process and treated as immutable.

pub mod error;
pub mod overlays;
pub mod providers;

#[cfg(test)]
mod tests;

pub use error::{DataError, DataResult};
pub use overlays::{load_boundary, load_overlay_raw};
pub use providers::{load_providers_csv, load_providers_reader, Provider, ProviderSet};
