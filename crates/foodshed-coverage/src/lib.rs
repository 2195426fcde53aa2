//! `foodshed-coverage` — coverage geometry and layer persistence.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`plane`]      | Projected-plane helpers: circles, (un)projection       |
//! | [`service`]    | Network service areas: per-origin hulls, union         |
//! | [`euclidean`]  | Straight-line radius buffers for the viewer            |
//! | [`layer`]      | `LayerKey`, file naming, output-directory catalog      |
//! | [`store`]      | Atomic GeoJSON persistence, run summary JSON           |
//! | [`pipeline`]   | Per-mode precompute orchestration                      |
//! | [`error`]      | `CoverageError`, `CoverageResult<T>`                   |
//!
//! Coverage geometry is computed in a local metres plane and unprojected to
//! WGS-84 only at the persistence boundary, so buffer radii and area
//! statistics are physically meaningful.

pub mod error;
pub mod euclidean;
pub mod layer;
pub mod pipeline;
pub mod plane;
pub mod service;
pub mod store;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoverageError, CoverageResult};
pub use euclidean::euclidean_coverage;
pub use layer::{LayerCatalog, LayerKey, LayerVariant};
pub use pipeline::{projection_for, run_mode};
pub use service::{service_area, BufferProfile};
pub use store::{LayerStats, LayerStore, RunSummary, SUMMARY_FILE};
