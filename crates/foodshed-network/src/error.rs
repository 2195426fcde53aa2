//! Network-subsystem error type.

use thiserror::Error;

/// Errors produced by `foodshed-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("network has no nodes inside the boundary")]
    EmptyNetwork,

    #[error("travel mode {0} has no road-network profile")]
    NoProfile(foodshed_core::TravelMode),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
