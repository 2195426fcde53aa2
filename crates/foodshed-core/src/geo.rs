//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude: coverage geometries are
//! serialized back out as GeoJSON, so coordinate precision must survive a
//! project → buffer → unproject round trip without visible drift.

/// Mean Earth radius in metres, shared by the haversine formula and the
/// local projection so distances agree between the two.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// One statute mile in metres.
pub const MILES_TO_METERS: f64 = 1_609.344;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite and inside the plausible
    /// geographic range.  Provider rows failing this check are dropped.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── LocalProjection ───────────────────────────────────────────────────────────

/// Equirectangular projection onto a local metres plane.
///
/// Buffering and area math happen in metres, not degrees, so coverage
/// geometry is computed in this plane and unprojected afterwards.  Within a
/// single metro area the distortion relative to a proper conformal CRS is
/// well under the smallest buffer radius used anywhere in the pipeline.
#[derive(Copy, Clone, Debug)]
pub struct LocalProjection {
    origin_lat: f64,
    origin_lon: f64,
    /// Cosine of the origin latitude, cached for the east-west scale.
    cos_lat: f64,
}

impl LocalProjection {
    /// Build a projection centred on `origin`.
    pub fn centered_on(origin: GeoPoint) -> Self {
        Self {
            origin_lat: origin.lat,
            origin_lon: origin.lon,
            cos_lat: origin.lat.to_radians().cos(),
        }
    }

    /// Geographic → plane.  Returns `(x, y)` in metres east/north of the
    /// projection origin.
    #[inline]
    pub fn to_plane(&self, p: GeoPoint) -> (f64, f64) {
        let x = (p.lon - self.origin_lon).to_radians() * self.cos_lat * EARTH_RADIUS_M;
        let y = (p.lat - self.origin_lat).to_radians() * EARTH_RADIUS_M;
        (x, y)
    }

    /// Plane → geographic.  Inverse of [`to_plane`](Self::to_plane).
    #[inline]
    pub fn to_wgs84(&self, x: f64, y: f64) -> GeoPoint {
        let lat = self.origin_lat + (y / EARTH_RADIUS_M).to_degrees();
        let lon = self.origin_lon + (x / (EARTH_RADIUS_M * self.cos_lat)).to_degrees();
        GeoPoint::new(lat, lon)
    }
}
