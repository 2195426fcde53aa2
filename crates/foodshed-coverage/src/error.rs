//! Coverage-subsystem error type.

use std::path::PathBuf;

use thiserror::Error;

use foodshed_core::TravelMode;

use crate::layer::LayerKey;

/// Errors produced by `foodshed-coverage`.
#[derive(Debug, Error)]
pub enum CoverageError {
    /// The requested layer has not been precomputed.  Non-fatal for the
    /// viewer: it renders an empty overlay and prompts for regeneration.
    #[error("no precomputed layer for {key} at {path}; run the precompute step to generate it")]
    MissingLayer { key: LayerKey, path: PathBuf },

    #[error("{0} is not a network mode; euclidean coverage is computed on the fly")]
    NotNetworkMode(TravelMode),

    #[error("no provider could be snapped to the road network")]
    NoOrigins,

    #[error("layer file {0}: expected Polygon or MultiPolygon geometry")]
    UnexpectedGeometry(PathBuf),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoverageResult<T> = Result<T, CoverageError>;
