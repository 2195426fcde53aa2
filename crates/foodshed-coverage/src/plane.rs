//! Projected-plane geometry helpers.
//!
//! Everything in this module works in a [`LocalProjection`] metres plane:
//! `x` east, `y` north.  WGS-84 geometries use GeoJSON axis order
//! (`x` = lon, `y` = lat).

use geo::MapCoords;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};

use foodshed_core::{GeoPoint, LocalProjection};

/// Vertices per buffer circle.  Coarse enough to stay cheap, fine enough
/// that the polygonized circle's area is within 1 % of πr².
pub const CIRCLE_SEGMENTS: usize = 32;

/// The open ring of a circle approximation around `center`.
pub fn circle_ring(center: Coord<f64>, radius_m: f64, segments: usize) -> Vec<Coord<f64>> {
    (0..segments)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / segments as f64;
            Coord {
                x: center.x + radius_m * theta.cos(),
                y: center.y + radius_m * theta.sin(),
            }
        })
        .collect()
}

/// A closed circle polygon around `center`.
pub fn circle_polygon(center: Coord<f64>, radius_m: f64, segments: usize) -> Polygon<f64> {
    let mut ring = circle_ring(center, radius_m, segments);
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    Polygon::new(LineString::from(ring), vec![])
}

/// Project a WGS-84 point into the plane.
#[inline]
pub fn point_to_plane(proj: &LocalProjection, p: GeoPoint) -> Coord<f64> {
    let (x, y) = proj.to_plane(p);
    Coord { x, y }
}

/// Project a WGS-84 multipolygon into the plane.
pub fn to_plane(proj: &LocalProjection, mp: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let proj = *proj;
    mp.map_coords(move |c| {
        let (x, y) = proj.to_plane(GeoPoint::new(c.y, c.x));
        Coord { x, y }
    })
}

/// Unproject a plane multipolygon back to WGS-84.
pub fn to_wgs84(proj: &LocalProjection, mp: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let proj = *proj;
    mp.map_coords(move |c| {
        let p = proj.to_wgs84(c.x, c.y);
        Coord { x: p.lon, y: p.lat }
    })
}
