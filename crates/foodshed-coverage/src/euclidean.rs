//! Straight-line radius buffers.
//!
//! Euclidean coverage is cheap enough to compute per request, so the viewer
//! never persists it: a circle of the selected radius around every provider,
//! unioned.  Unlike network coverage it is not clipped to the boundary —
//! "as the crow flies" extends past the city limit.

use geo::unary_union;
use geo_types::{MultiPolygon, Polygon};

use foodshed_core::{DistanceBand, GeoPoint, LocalProjection};

use crate::plane::{circle_polygon, point_to_plane, to_wgs84, CIRCLE_SEGMENTS};

/// Union of radius buffers around `positions`, returned in WGS-84.
///
/// Grows monotonically with the band: every circle at a smaller radius is
/// contained in its larger counterpart, and union preserves containment.
pub fn euclidean_coverage(
    proj: &LocalProjection,
    positions: &[GeoPoint],
    band: DistanceBand,
) -> MultiPolygon<f64> {
    let radius_m = band.meters();

    let circles: Vec<Polygon<f64>> = positions
        .iter()
        .map(|&p| circle_polygon(point_to_plane(proj, p), radius_m, CIRCLE_SEGMENTS))
        .collect();

    to_wgs84(proj, &unary_union(&circles))
}
