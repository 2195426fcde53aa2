//! Network service areas.
//!
//! For one origin node the service area is the convex hull of everything
//! reachable within the cutoff, with reached nodes buffered by the mode's
//! node radius and reached edges by its edge radius.  The hull of a union
//! equals the hull of all constituent vertices, so no per-origin boolean
//! union is needed — only the cross-origin union at the end.

use geo::{unary_union, ConvexHull};
use geo_types::{MultiPoint, MultiPolygon, Point, Polygon};
use rayon::prelude::*;

use foodshed_core::{LocalProjection, NodeId, TravelMode};
use foodshed_network::{reachable_within, RoadNetwork};

use crate::plane::{circle_ring, point_to_plane, CIRCLE_SEGMENTS};

// ── BufferProfile ─────────────────────────────────────────────────────────────

/// Buffer radii applied around reached network elements, per mode.
///
/// Drive networks are sparser than walk networks, so they get wider buffers
/// to paper over the larger gaps between carriageway centerlines.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BufferProfile {
    pub edge_buffer_m: f64,
    pub node_buffer_m: f64,
}

impl BufferProfile {
    /// The buffer configuration for a network mode; `None` for euclidean.
    pub fn for_mode(mode: TravelMode) -> Option<BufferProfile> {
        match mode {
            TravelMode::Walk  => Some(BufferProfile { edge_buffer_m: 60.0, node_buffer_m: 40.0 }),
            TravelMode::Drive => Some(BufferProfile { edge_buffer_m: 90.0, node_buffer_m: 60.0 }),
            TravelMode::Euclidean => None,
        }
    }
}

// ── Service area ──────────────────────────────────────────────────────────────

/// Union of per-origin service areas, in the projected plane.
///
/// Origins fan out across rayon workers; the per-origin hulls are collected
/// in origin order and unioned deterministically, so repeated runs produce
/// identical geometry.
pub fn service_area(
    network: &RoadNetwork,
    proj: &LocalProjection,
    origins: &[NodeId],
    cutoff_m: f64,
    profile: BufferProfile,
) -> MultiPolygon<f64> {
    let hulls: Vec<Polygon<f64>> = origins
        .par_iter()
        .filter_map(|&origin| origin_hull(network, proj, origin, cutoff_m, profile))
        .collect();

    unary_union(&hulls)
}

/// Convex hull of the buffered reach set of a single origin, or `None`
/// when nothing is reachable (out-of-range origin on an empty network).
fn origin_hull(
    network: &RoadNetwork,
    proj: &LocalProjection,
    origin: NodeId,
    cutoff_m: f64,
    profile: BufferProfile,
) -> Option<Polygon<f64>> {
    let reach = reachable_within(network, origin, cutoff_m);
    if reach.is_empty() {
        return None;
    }

    let mut points: Vec<Point<f64>> = Vec::with_capacity(
        (reach.nodes.len() + 2 * reach.edges.len()) * CIRCLE_SEGMENTS,
    );

    for &node in &reach.nodes {
        let center = point_to_plane(proj, network.node_pos[node.index()]);
        points.extend(
            circle_ring(center, profile.node_buffer_m, CIRCLE_SEGMENTS)
                .into_iter()
                .map(Point::from),
        );
    }

    // Buffering an edge by r and hulling is the same as hulling the two
    // endpoint circles of radius r, since edges are straight segments.
    for &edge in &reach.edges {
        for node in [network.edge_from[edge.index()], network.edge_to[edge.index()]] {
            let center = point_to_plane(proj, network.node_pos[node.index()]);
            points.extend(
                circle_ring(center, profile.edge_buffer_m, CIRCLE_SEGMENTS)
                    .into_iter()
                    .map(Point::from),
            );
        }
    }

    Some(MultiPoint::new(points).convex_hull())
}
