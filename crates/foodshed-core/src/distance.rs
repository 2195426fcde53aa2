//! Discrete travel-distance bands.
//!
//! The viewer's slider and the precompute pipeline both operate on tenths of
//! a mile from 0.1 to 1.0.  Storing the band as integer tenths keeps layer
//! keys exact: no float equality, no `0.30000000000000004` file names.

use crate::error::CoreError;
use crate::geo::MILES_TO_METERS;

/// A travel distance in tenths of a mile, restricted to the supported
/// 0.1–1.0 mile selector range.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceBand(u8);

impl DistanceBand {
    pub const MIN: DistanceBand = DistanceBand(1);
    pub const MAX: DistanceBand = DistanceBand(10);

    /// Construct from integer tenths of a mile (1 ..= 10).
    pub fn from_tenths(tenths: u8) -> Result<Self, CoreError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&tenths) {
            Ok(DistanceBand(tenths))
        } else {
            Err(CoreError::DistanceOutOfRange(tenths as f64 / 10.0))
        }
    }

    /// Construct from fractional miles, rounding to the nearest tenth the
    /// way the CLI flags are documented to behave.
    pub fn from_miles(miles: f64) -> Result<Self, CoreError> {
        if !miles.is_finite() {
            return Err(CoreError::DistanceOutOfRange(miles));
        }
        let tenths = (miles * 10.0).round();
        if tenths < Self::MIN.0 as f64 || tenths > Self::MAX.0 as f64 {
            return Err(CoreError::DistanceOutOfRange(miles));
        }
        Ok(DistanceBand(tenths as u8))
    }

    /// The full supported band set, ascending (0.1, 0.2, … 1.0).
    pub fn all() -> impl Iterator<Item = DistanceBand> {
        (Self::MIN.0..=Self::MAX.0).map(DistanceBand)
    }

    #[inline]
    pub fn tenths(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn miles(self) -> f64 {
        self.0 as f64 / 10.0
    }

    #[inline]
    pub fn meters(self) -> f64 {
        self.miles() * MILES_TO_METERS
    }
}

impl std::fmt::Display for DistanceBand {
    /// Formats as fractional miles with one decimal, e.g. `0.3`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.miles())
    }
}
