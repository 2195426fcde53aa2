//! Travel mode enum shared across the data, coverage, and viewer layers.
//!
//! `Euclidean` is a straight-line distance model computed on the fly by the
//! viewer; `Walk` and `Drive` are road-network distance models whose coverage
//! layers are produced offline by the precompute pipeline.

use std::str::FromStr;

use crate::error::CoreError;

/// The distance model a coverage layer is computed under.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TravelMode {
    /// Straight-line radius buffer, no network involved.
    Euclidean,
    /// Pedestrian road-network distance.
    Walk,
    /// Car road-network distance.
    Drive,
}

impl TravelMode {
    /// All modes, in selector order.
    pub const ALL: [TravelMode; 3] =
        [TravelMode::Euclidean, TravelMode::Walk, TravelMode::Drive];

    /// The modes that require a precomputed network coverage layer.
    pub const NETWORK: [TravelMode; 2] = [TravelMode::Walk, TravelMode::Drive];

    /// `true` for modes resolved against precomputed layers rather than
    /// computed on the fly.
    #[inline]
    pub fn is_network(self) -> bool {
        matches!(self, TravelMode::Walk | TravelMode::Drive)
    }

    /// Stable lowercase label, used in file names and API paths.
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Euclidean => "euclidean",
            TravelMode::Walk      => "walk",
            TravelMode::Drive     => "drive",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(TravelMode::Euclidean),
            "walk"      => Ok(TravelMode::Walk),
            "drive"     => Ok(TravelMode::Drive),
            other       => Err(CoreError::UnknownMode(other.to_string())),
        }
    }
}
