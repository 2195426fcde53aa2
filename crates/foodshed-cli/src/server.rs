//! The interactive viewer: state, router, and API handlers.
//!
//! All inputs are loaded once at startup; every request after that is a
//! synchronous lookup (walk/drive layers re-read from the coverage
//! directory) or a cheap recompute (euclidean buffers).  A missing
//! precomputed layer degrades to a 404 carrying a regeneration prompt that
//! the embedded UI renders as a banner over an empty overlay.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path as UrlPath, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use geo_types::MultiPolygon;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use foodshed_core::{DistanceBand, GeoPoint, LocalProjection, TravelMode};
use foodshed_coverage::{
    euclidean_coverage, projection_for, CoverageError, LayerKey, LayerStore, LayerVariant,
};
use foodshed_data::providers::to_feature_collection;
use foodshed_data::{load_boundary, load_overlay_raw, load_providers_csv, ProviderSet};

// ── ViewerState ───────────────────────────────────────────────────────────────

/// Input file locations for [`ViewerState::from_files`].
#[derive(Debug, Clone)]
pub struct ViewerPaths {
    pub csv:          PathBuf,
    pub boundary:     PathBuf,
    pub transit:      Option<PathBuf>,
    pub coverage_dir: PathBuf,
}

/// Everything the viewer serves, loaded once per process.
pub struct ViewerState {
    positions:         Vec<GeoPoint>,
    providers_geojson: serde_json::Value,
    boundary_geojson:  serde_json::Value,
    transit_geojson:   Option<serde_json::Value>,
    proj:              LocalProjection,
    store:             LayerStore,
}

impl ViewerState {
    /// Load provider and overlay inputs.  Any missing or malformed file is
    /// fatal here — the operator gets one clear message at startup instead
    /// of a half-working map.
    pub fn from_files(paths: &ViewerPaths) -> anyhow::Result<Self> {
        let providers = load_providers_csv(&paths.csv)
            .with_context(|| format!("loading provider CSV {}", paths.csv.display()))?;
        info!(
            providers = providers.len(),
            skipped = providers.skipped,
            "loaded provider CSV"
        );

        let boundary = load_boundary(&paths.boundary)
            .with_context(|| format!("loading boundary {}", paths.boundary.display()))?;
        let boundary_geojson = raw_overlay_value(&paths.boundary)?;

        let transit_geojson = match &paths.transit {
            Some(path) => Some(
                raw_overlay_value(path)
                    .with_context(|| format!("loading transit overlay {}", path.display()))?,
            ),
            None => None,
        };

        Self::new(
            providers,
            boundary,
            boundary_geojson,
            transit_geojson,
            LayerStore::new(&paths.coverage_dir),
        )
    }

    /// Assemble a state from already-loaded parts (used directly by tests).
    pub fn new(
        providers: ProviderSet,
        boundary: MultiPolygon<f64>,
        boundary_geojson: serde_json::Value,
        transit_geojson: Option<serde_json::Value>,
        store: LayerStore,
    ) -> anyhow::Result<Self> {
        let providers_geojson = serde_json::to_value(geojson::GeoJson::FeatureCollection(
            to_feature_collection(&providers.providers),
        ))?;

        Ok(Self {
            positions: providers.positions(),
            providers_geojson,
            boundary_geojson,
            transit_geojson,
            proj: projection_for(&boundary),
            store,
        })
    }
}

fn raw_overlay_value(path: &Path) -> anyhow::Result<serde_json::Value> {
    let gj = load_overlay_raw(path)
        .with_context(|| format!("loading overlay {}", path.display()))?;
    Ok(serde_json::to_value(gj)?)
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the viewer's HTTP surface.
pub fn router(state: Arc<ViewerState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/providers", get(providers))
        .route("/api/overlays/boundary", get(boundary_overlay))
        .route("/api/overlays/transit", get(transit_overlay))
        .route("/api/coverage/{mode}/{distance}", get(coverage))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn index() -> Html<&'static str> {
    Html(include_str!("assets/index.html"))
}

async fn health() -> &'static str {
    "OK"
}

async fn providers(State(state): State<Arc<ViewerState>>) -> Json<serde_json::Value> {
    Json(state.providers_geojson.clone())
}

async fn boundary_overlay(State(state): State<Arc<ViewerState>>) -> Json<serde_json::Value> {
    Json(state.boundary_geojson.clone())
}

async fn transit_overlay(State(state): State<Arc<ViewerState>>) -> Response {
    match &state.transit_geojson {
        Some(value) => Json(value.clone()).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "no transit overlay configured".to_string(),
            None,
        ),
    }
}

#[derive(Deserialize)]
struct CoverageQuery {
    variant: Option<String>,
}

async fn coverage(
    State(state): State<Arc<ViewerState>>,
    UrlPath((mode, distance)): UrlPath<(String, f64)>,
    Query(query): Query<CoverageQuery>,
) -> Response {
    let mode: TravelMode = match mode.parse() {
        Ok(m) => m,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string(), None),
    };
    let band = match DistanceBand::from_miles(distance) {
        Ok(b) => b,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string(), None),
    };
    let variant = match query.variant.as_deref() {
        None | Some("coverage") => LayerVariant::Coverage,
        Some("uncovered") => LayerVariant::Uncovered,
        Some(other) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("unknown variant {other:?} (expected coverage or uncovered)"),
                None,
            )
        }
    };

    let key = LayerKey::new(mode, band);

    if mode == TravelMode::Euclidean {
        if variant == LayerVariant::Uncovered {
            return error_response(
                StatusCode::BAD_REQUEST,
                "euclidean coverage has no uncovered variant".to_string(),
                None,
            );
        }
        let geometry = euclidean_coverage(&state.proj, &state.positions, band);
        return layer_response(key, &geometry);
    }

    match state.store.read_layer(key, variant) {
        Ok(geometry) => layer_response(key, &geometry),
        Err(err @ CoverageError::MissingLayer { .. }) => error_response(
            StatusCode::NOT_FOUND,
            err.to_string(),
            Some(format!(
                "precompute --modes {} --distance-miles {} --output-dir {}",
                mode,
                band,
                state.store.dir().display()
            )),
        ),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None),
    }
}

// ── Response helpers ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    regenerate_hint: Option<String>,
}

fn error_response(status: StatusCode, error: String, regenerate_hint: Option<String>) -> Response {
    (status, Json(ErrorBody { error, regenerate_hint })).into_response()
}

/// Wrap a layer geometry as a one-feature GeoJSON FeatureCollection.
fn layer_response(key: LayerKey, geometry: &MultiPolygon<f64>) -> Response {
    let mut props = geojson::JsonObject::new();
    props.insert("name".into(), key.to_string().into());

    let feature = geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(geometry))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    };
    let fc = geojson::GeoJson::FeatureCollection(geojson::FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    });

    match serde_json::to_value(fc) {
        Ok(value) => Json(value).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None),
    }
}
