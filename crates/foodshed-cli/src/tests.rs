//! Unit tests for the application layer: flag resolution and API routes.

// ── Distance/mode selection ───────────────────────────────────────────────────

#[cfg(test)]
mod selection {
    use crate::selection::{resolve_distances, resolve_modes, DistanceFlags};
    use foodshed_core::TravelMode;

    fn defaults() -> DistanceFlags<'static> {
        DistanceFlags { single: None, list: None, start: 0.1, end: 1.0, step: 0.1 }
    }

    #[test]
    fn default_flags_select_full_grid() {
        let bands = resolve_distances(defaults()).unwrap();
        assert_eq!(bands.len(), 10);
        assert_eq!(bands.first().unwrap().miles(), 0.1);
        assert_eq!(bands.last().unwrap().miles(), 1.0);
        assert!(bands.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_distance_overrides_everything() {
        let flags = DistanceFlags {
            single: Some(0.4),
            list: Some("0.1,0.9"),
            ..defaults()
        };
        let bands = resolve_distances(flags).unwrap();
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].miles(), 0.4);
    }

    #[test]
    fn list_sorted_and_deduplicated() {
        let flags = DistanceFlags { list: Some(" 0.7,0.1 , 0.3, 0.7"), ..defaults() };
        let miles: Vec<f64> = resolve_distances(flags)
            .unwrap()
            .iter()
            .map(|b| b.miles())
            .collect();
        assert_eq!(miles, vec![0.1, 0.3, 0.7]);
    }

    #[test]
    fn bad_list_entries_rejected() {
        assert!(resolve_distances(DistanceFlags { list: Some("0.1,oops"), ..defaults() }).is_err());
        assert!(resolve_distances(DistanceFlags { list: Some("2.5"), ..defaults() }).is_err());
        assert!(resolve_distances(DistanceFlags { list: Some(" , ,"), ..defaults() }).is_err());
    }

    #[test]
    fn partial_range_walks_inclusive() {
        let flags = DistanceFlags { start: 0.2, end: 0.6, step: 0.2, ..defaults() };
        let miles: Vec<f64> = resolve_distances(flags)
            .unwrap()
            .iter()
            .map(|b| b.miles())
            .collect();
        assert_eq!(miles, vec![0.2, 0.4, 0.6]);
    }

    #[test]
    fn non_positive_step_rejected() {
        assert!(resolve_distances(DistanceFlags { step: 0.0, ..defaults() }).is_err());
        assert!(resolve_distances(DistanceFlags { step: -0.1, ..defaults() }).is_err());
    }

    #[test]
    fn modes_parsed_and_deduplicated() {
        assert_eq!(
            resolve_modes("walk,drive").unwrap(),
            vec![TravelMode::Walk, TravelMode::Drive]
        );
        assert_eq!(resolve_modes(" Drive ,drive").unwrap(), vec![TravelMode::Drive]);
    }

    #[test]
    fn non_network_modes_rejected() {
        assert!(resolve_modes("euclidean").is_err());
        assert!(resolve_modes("bike").is_err());
        assert!(resolve_modes("").is_err());
    }
}

// ── API routes ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod server {
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use geo_types::{polygon, MultiPolygon};
    use tower::ServiceExt;

    use foodshed_core::{DistanceBand, TravelMode};
    use foodshed_coverage::{LayerKey, LayerStore, LayerVariant};
    use foodshed_data::load_providers_reader;

    use crate::server::{router, ViewerState};

    fn boundary() -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: -84.394, y: 33.748),
            (x: -84.388, y: 33.748),
            (x: -84.388, y: 33.752),
            (x: -84.394, y: 33.752),
            (x: -84.394, y: 33.748),
        ]])
    }

    fn test_state(coverage_dir: &Path) -> Arc<ViewerState> {
        let csv = "license_number,company_name,latitude,longitude\n\
                   L1,ACME GROCERY,33.750,-84.392\n\
                   L2,CORNER MARKET,33.750,-84.390\n";
        let providers = load_providers_reader(Cursor::new(csv)).unwrap();

        let boundary = boundary();
        let boundary_geojson = serde_json::to_value(geojson::Geometry::new(
            geojson::Value::from(&boundary),
        ))
        .unwrap();

        Arc::new(
            ViewerState::new(
                providers,
                boundary,
                boundary_geojson,
                None,
                LayerStore::new(coverage_dir),
            )
            .unwrap(),
        )
    }

    async fn get(state: Arc<ViewerState>, uri: &str) -> StatusCode {
        let resp = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        resp.status()
    }

    #[tokio::test]
    async fn health_check() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(get(test_state(dir.path()), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn index_and_static_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        assert_eq!(get(state.clone(), "/").await, StatusCode::OK);
        assert_eq!(get(state.clone(), "/api/providers").await, StatusCode::OK);
        assert_eq!(get(state, "/api/overlays/boundary").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn transit_absent_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            get(test_state(dir.path()), "/api/overlays/transit").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn euclidean_coverage_computed_on_the_fly() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            get(test_state(dir.path()), "/api/coverage/euclidean/0.5").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn missing_network_layer_prompts_not_crashes() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            get(test_state(dir.path()), "/api/coverage/walk/0.3").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn precomputed_layer_served_once_present() {
        let dir = tempfile::tempdir().unwrap();
        let store = LayerStore::new(dir.path());
        let key = LayerKey::new(TravelMode::Walk, DistanceBand::from_miles(0.3).unwrap());
        store
            .write_layer(key, LayerVariant::Coverage, &boundary())
            .unwrap();

        assert_eq!(
            get(test_state(dir.path()), "/api/coverage/walk/0.3").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn invalid_mode_and_distance_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        assert_eq!(
            get(state.clone(), "/api/coverage/bike/0.3").await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get(state.clone(), "/api/coverage/walk/5.0").await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get(state, "/api/coverage/walk/0.3?variant=sideways").await,
            StatusCode::BAD_REQUEST
        );
    }
}
