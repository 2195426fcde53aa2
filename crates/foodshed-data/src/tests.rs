//! Unit tests for foodshed-data.
//!
//! CSV tests feed `load_providers_reader` from in-memory cursors; overlay
//! tests parse GeoJSON literals.  No fixture files required.

// ── Provider CSV ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod providers {
    use std::io::Cursor;

    use crate::providers::{load_providers_reader, to_feature_collection};
    use crate::DataError;

    const HEADER: &str = "license_number,company_name,company_dba,naics_name,\
                          address_api,council_district,npu,disinvested_neighborhood,\
                          latitude,longitude\n";

    fn load(rows: &str) -> crate::ProviderSet {
        let csv = format!("{HEADER}{rows}");
        load_providers_reader(Cursor::new(csv)).unwrap()
    }

    #[test]
    fn valid_rows_all_kept() {
        let set = load(
            "L1,ACME GROCERY,,Supermarkets,12 Main St,5,M,true,33.749,-84.388\n\
             L2,CORNER MARKET,THE CORNER,Convenience,9 Oak Ave,5,M,false,33.761,-84.402\n",
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.skipped, 0);

        let acme = &set.providers[0];
        assert_eq!(acme.license, "L1");
        assert_eq!(acme.name, "ACME GROCERY");
        assert_eq!(acme.dba, None); // blank cell becomes None
        assert_eq!(acme.category.as_deref(), Some("Supermarkets"));
        assert_eq!(acme.disinvested, Some(true));
        assert!((acme.position.lat - 33.749).abs() < 1e-9);
    }

    #[test]
    fn invalid_coordinates_skipped_not_fatal() {
        let set = load(
            "L1,GOOD,,,,,,,33.749,-84.388\n\
             L2,NOT NUMERIC,,,,,,,abc,-84.0\n\
             L3,EMPTY,,,,,,,,\n\
             L4,OUT OF RANGE,,,,,,,95.0,-84.0\n\
             L5,ALSO GOOD,,,,,,,33.8,-84.4\n",
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.skipped, 3);
        assert_eq!(set.providers[0].license, "L1");
        assert_eq!(set.providers[1].license, "L5");
    }

    #[test]
    fn missing_coordinate_column_is_fatal() {
        let csv = "license_number,company_name\nL1,ACME\n";
        let err = load_providers_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("latitude")));
    }

    #[test]
    fn extra_columns_ignored() {
        let csv = "license_number,company_name,latitude,longitude,mystery_column\n\
                   L1,ACME,33.7,-84.4,whatever\n";
        let set = load_providers_reader(Cursor::new(csv)).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn disinvested_normalization() {
        let set = load(
            "L1,A,,,,,,TRUE,33.7,-84.4\n\
             L2,B,,,,,,0,33.7,-84.4\n\
             L3,C,,,,,,maybe,33.7,-84.4\n",
        );
        assert_eq!(set.providers[0].disinvested, Some(true));
        assert_eq!(set.providers[1].disinvested, Some(false));
        assert_eq!(set.providers[2].disinvested, None);
    }

    #[test]
    fn feature_collection_round_trip() {
        let set = load("L1,ACME,,Supermarkets,,,,,33.749,-84.388\n");
        let fc = to_feature_collection(&set.providers);
        assert_eq!(fc.features.len(), 1);

        let f = &fc.features[0];
        let props = f.properties.as_ref().unwrap();
        assert_eq!(props["name"], "ACME");
        assert_eq!(props["category"], "Supermarkets");
        match &f.geometry.as_ref().unwrap().value {
            geojson::Value::Point(coords) => {
                assert!((coords[0] + 84.388).abs() < 1e-9); // lon first
                assert!((coords[1] - 33.749).abs() < 1e-9);
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }
}

// ── Overlays ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod overlays {
    use std::io::Write;

    use crate::overlays::load_boundary;
    use crate::DataError;

    const POLYGON: &str = r#"{
        "type": "Polygon",
        "coordinates": [[[-84.5, 33.6], [-84.2, 33.6], [-84.2, 33.9], [-84.5, 33.9], [-84.5, 33.6]]]
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn bare_geometry() {
        let f = write_temp(POLYGON);
        let mp = load_boundary(f.path()).unwrap();
        assert_eq!(mp.0.len(), 1);
        assert_eq!(mp.0[0].exterior().0.len(), 5);
    }

    #[test]
    fn feature_wrapping() {
        let f = write_temp(&format!(
            r#"{{"type": "Feature", "properties": {{}}, "geometry": {POLYGON}}}"#
        ));
        assert_eq!(load_boundary(f.path()).unwrap().0.len(), 1);
    }

    #[test]
    fn feature_collection_first_feature_wins() {
        let f = write_temp(&format!(
            r#"{{"type": "FeatureCollection", "features": [
                {{"type": "Feature", "properties": {{}}, "geometry": {POLYGON}}},
                {{"type": "Feature", "properties": {{}}, "geometry": {POLYGON}}}
            ]}}"#
        ));
        assert_eq!(load_boundary(f.path()).unwrap().0.len(), 1);
    }

    #[test]
    fn non_polygon_rejected() {
        let f = write_temp(r#"{"type": "Point", "coordinates": [-84.4, 33.7]}"#);
        let err = load_boundary(f.path()).unwrap_err();
        assert!(matches!(err, DataError::UnexpectedGeometry { .. }));
    }

    #[test]
    fn missing_file_reported() {
        let err = load_boundary(std::path::Path::new("no/such/file.geojson")).unwrap_err();
        assert!(matches!(err, DataError::MissingInput(_)));
    }
}
