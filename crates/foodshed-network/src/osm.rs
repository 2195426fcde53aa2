//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use foodshed_network::osm::{load_from_pbf, RoutingProfile};
//!
//! let network = load_from_pbf(Path::new("atlanta.osm.pbf"), RoutingProfile::Walk, Some(&boundary))?;
//! ```
//!
//! # What is loaded
//!
//! Only `highway=*` ways admitted by the requested [`RoutingProfile`] are
//! included.  All other features (buildings, POIs, relations) are ignored.
//! For the drive profile, one-way roads add a single directed edge and
//! two-way roads add both directions; the walk profile always adds both
//! directions.  When a boundary is supplied, a way segment is kept only if
//! at least one endpoint falls inside it (truncate-by-edge semantics), so
//! roads crossing the city limit are retained but distant sprawl is not.
//!
//! # Memory note
//!
//! The loader buffers all OSM nodes in a map keyed by OSM integer ID for the
//! first pass (needed because ways reference node IDs).  For a metro-area
//! extract this is a few million entries; the map is freed before the R-tree
//! is built.

use std::path::Path;

use geo::Contains;
use geo_types::{MultiPolygon, Point};
use osmpbf::{Element, ElementReader};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

use foodshed_core::{GeoPoint, NodeId, TravelMode};

use crate::error::NetworkError;
use crate::network::{RoadNetwork, RoadNetworkBuilder};

// ── RoutingProfile ────────────────────────────────────────────────────────────

/// Which OSM ways a network admits, and whether one-way tags bind.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RoutingProfile {
    /// Pedestrian network: everything walkable, one-way tags ignored.
    Walk,
    /// Car network: drivable classes only, one-way tags honored.
    Drive,
}

impl RoutingProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            RoutingProfile::Walk  => "walk",
            RoutingProfile::Drive => "drive",
        }
    }

    /// `true` if ways with this `highway` value belong in the profile's
    /// network.
    fn admits(self, highway: &str) -> bool {
        match self {
            RoutingProfile::Walk  => walkable(highway),
            RoutingProfile::Drive => drivable(highway),
        }
    }
}

impl TryFrom<TravelMode> for RoutingProfile {
    type Error = NetworkError;

    fn try_from(mode: TravelMode) -> Result<Self, Self::Error> {
        match mode {
            TravelMode::Walk  => Ok(RoutingProfile::Walk),
            TravelMode::Drive => Ok(RoutingProfile::Drive),
            TravelMode::Euclidean => Err(NetworkError::NoProfile(mode)),
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a road network from an OSM PBF file, filtered to `profile` and
/// optionally clipped to `boundary`.
///
/// # Errors
///
/// Returns [`NetworkError::Osm`] on parse errors, [`NetworkError::Io`] on
/// file errors, and [`NetworkError::EmptyNetwork`] when nothing usable
/// remains after filtering and clipping — the caller treats that the same
/// as an unavailable network source.
pub fn load_from_pbf(
    path: &Path,
    profile: RoutingProfile,
    boundary: Option<&MultiPolygon<f64>>,
) -> Result<RoadNetwork, NetworkError> {
    // ── Phase 1: collect all OSM nodes + admitted ways in one pass ────────
    let reader =
        ElementReader::from_path(path).map_err(|e| NetworkError::Osm(e.to_string()))?;

    let mut all_nodes: FxHashMap<i64, GeoPoint> = FxHashMap::default();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let highway = tags
                    .iter()
                    .find(|(k, _)| *k == "highway")
                    .map(|(_, v)| *v);

                if let Some(highway) = highway.filter(|h| profile.admits(h)) {
                    let oneway = profile == RoutingProfile::Drive
                        && is_oneway(highway, &tags);
                    let refs: Vec<i64> = w.refs().collect();
                    road_ways.push(OsmWay { refs, oneway });
                }
            }
            _ => {}
        })
        .map_err(|e| NetworkError::Osm(e.to_string()))?;

    // ── Phase 2: identify road-referenced node IDs, apply boundary clip ───
    let road_node_ids: FxHashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .collect();

    let inside: FxHashSet<i64> = match boundary {
        Some(boundary) => road_node_ids
            .iter()
            .copied()
            .filter(|id| {
                all_nodes
                    .get(id)
                    .is_some_and(|p| boundary.contains(&Point::new(p.lon, p.lat)))
            })
            .collect(),
        None => road_node_ids.clone(),
    };

    // ── Phase 3: build network ────────────────────────────────────────────
    // Pre-allocate: ~2× road nodes for edges (rough estimate).
    let mut builder = RoadNetworkBuilder::with_capacity(
        road_node_ids.len(),
        road_node_ids.len() * 2,
    );

    // Map OSM node IDs → our NodeIds, adding only road-relevant nodes.
    let mut osm_to_net: FxHashMap<i64, NodeId> = FxHashMap::default();

    for way in &road_ways {
        for window in way.refs.windows(2) {
            let (osm_a, osm_b) = (window[0], window[1]);
            // Truncate by edge: keep the segment when either end is inside.
            if !inside.contains(&osm_a) && !inside.contains(&osm_b) {
                continue;
            }
            let (Some(&pa), Some(&pb)) = (all_nodes.get(&osm_a), all_nodes.get(&osm_b)) else {
                continue; // way references a node missing from the extract
            };

            let from = *osm_to_net
                .entry(osm_a)
                .or_insert_with(|| builder.add_node(pa));
            let to = *osm_to_net
                .entry(osm_b)
                .or_insert_with(|| builder.add_node(pb));

            let len_m = pa.distance_m(pb);
            builder.add_directed_edge(from, to, len_m);
            if !way.oneway {
                builder.add_directed_edge(to, from, len_m);
            }
        }
    }

    drop(all_nodes);
    drop(osm_to_net);

    if builder.node_count() == 0 {
        return Err(NetworkError::EmptyNetwork);
    }

    info!(
        profile = profile.as_str(),
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        "built road network from PBF"
    );

    Ok(builder.build())
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmWay {
    refs:   Vec<i64>,
    oneway: bool,
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// `true` for road classes a car may drive on.
fn drivable(highway: &str) -> bool {
    match highway {
        "motorway" | "motorway_link"
        | "trunk" | "trunk_link"
        | "primary" | "primary_link"
        | "secondary" | "secondary_link"
        | "tertiary" | "tertiary_link"
        | "residential" | "living_street"
        | "service" | "unclassified" => true,
        // Explicitly non-car:
        "footway" | "path" | "cycleway"
        | "pedestrian" | "steps" | "track" => false,
        // Unknown road type — admit cautiously rather than dropping.
        _ => true,
    }
}

/// `true` for ways a pedestrian may use.  Motorways and their ramps are the
/// only hard exclusions; everything else in an urban extract is walkable.
fn walkable(highway: &str) -> bool {
    !matches!(highway, "motorway" | "motorway_link" | "trunk" | "trunk_link")
}

/// Determine whether a way should be treated as one-way for car traffic.
///
/// Motorways and motorway links are implicitly one-way in OSM convention.
fn is_oneway(highway: &str, tags: &[(&str, &str)]) -> bool {
    let explicit = tags.iter().any(|(k, v)| {
        *k == "oneway" && matches!(*v, "yes" | "1" | "true")
    });
    let implicit = matches!(highway, "motorway" | "motorway_link");
    explicit || implicit
}
