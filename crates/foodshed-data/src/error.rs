//! Input-loading error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading provider CSVs and overlay GeoJSON.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    #[error("provider CSV is missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("overlay {path}: expected Polygon or MultiPolygon, got {got}")]
    UnexpectedGeometry { path: PathBuf, got: String },

    #[error("overlay {0} contains no geometry")]
    EmptyOverlay(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for input loading.
pub type DataResult<T> = Result<T, DataError>;
