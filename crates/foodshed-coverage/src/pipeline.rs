//! Per-mode precompute orchestration.
//!
//! One [`run_mode`] call handles every requested distance for a single
//! network mode: snap providers once, then walk the distance list, writing
//! a coverage/uncovered pair per band and collecting statistics for the run
//! summary.  Mode-level failures (unusable network, nothing snapped) are
//! returned to the caller, which isolates them so other modes proceed.

use std::collections::BTreeMap;

use geo::{Area, BooleanOps, Centroid};
use geo_types::MultiPolygon;
use tracing::{debug, info};

use foodshed_core::{DistanceBand, GeoPoint, LocalProjection, TravelMode};
use foodshed_network::RoadNetwork;

use crate::error::{CoverageError, CoverageResult};
use crate::layer::{LayerKey, LayerVariant};
use crate::plane::{to_plane, to_wgs84};
use crate::service::{service_area, BufferProfile};
use crate::store::{LayerStats, LayerStore};

/// A metres plane centred on the boundary, shared by every geometry step of
/// a run so projected coordinates line up across layers.
pub fn projection_for(boundary: &MultiPolygon<f64>) -> LocalProjection {
    let center = boundary
        .centroid()
        .map(|c| GeoPoint::new(c.y(), c.x()))
        .unwrap_or_else(|| GeoPoint::new(0.0, 0.0));
    LocalProjection::centered_on(center)
}

/// Compute and persist every requested distance band for one network mode.
///
/// Returns the per-distance statistics on success.  Any error aborts this
/// mode only — the caller logs it and continues with the next mode.
pub fn run_mode(
    store: &LayerStore,
    mode: TravelMode,
    network: &RoadNetwork,
    positions: &[GeoPoint],
    boundary: &MultiPolygon<f64>,
    bands: &[DistanceBand],
) -> CoverageResult<BTreeMap<String, LayerStats>> {
    let profile =
        BufferProfile::for_mode(mode).ok_or(CoverageError::NotNetworkMode(mode))?;

    let proj = projection_for(boundary);
    let boundary_plane = to_plane(&proj, boundary);
    let boundary_area = boundary_plane.unsigned_area();

    let origins = network.snap_origins(positions);
    if origins.is_empty() {
        return Err(CoverageError::NoOrigins);
    }
    info!(
        mode = %mode,
        origins = origins.len(),
        providers = positions.len(),
        "snapped providers to network origins"
    );

    let mut stats = BTreeMap::new();

    for &band in bands {
        debug!(mode = %mode, distance = %band, "computing service area");

        let raw = service_area(network, &proj, &origins, band.meters(), profile);
        let coverage_plane = raw.intersection(&boundary_plane);
        let uncovered_plane = boundary_plane.difference(&coverage_plane);

        let covered_area = coverage_plane.unsigned_area();
        let uncovered_area = uncovered_plane.unsigned_area();

        let key = LayerKey::new(mode, band);
        let coverage_path =
            store.write_layer(key, LayerVariant::Coverage, &to_wgs84(&proj, &coverage_plane))?;
        let uncovered_path =
            store.write_layer(key, LayerVariant::Uncovered, &to_wgs84(&proj, &uncovered_plane))?;

        info!(
            mode = %mode,
            distance = %band,
            coverage_ratio = %format!("{:.3}", ratio(covered_area, boundary_area)),
            "wrote coverage layer"
        );

        stats.insert(
            band.to_string(),
            LayerStats {
                coverage_path:       coverage_path.display().to_string(),
                uncovered_path:      uncovered_path.display().to_string(),
                unique_origin_nodes: origins.len(),
                covered_area_sq_m:   covered_area,
                uncovered_area_sq_m: uncovered_area,
                coverage_ratio:      ratio(covered_area, boundary_area),
            },
        );
    }

    Ok(stats)
}

fn ratio(covered: f64, total: f64) -> f64 {
    if total > 0.0 { covered / total } else { 0.0 }
}
