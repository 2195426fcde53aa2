//! Provider CSV loader.
//!
//! # CSV format
//!
//! One row per licensed provider.  `latitude`/`longitude` are required
//! columns; every attribute column is optional and extra columns are
//! ignored.
//!
//! ```csv
//! license_number,company_name,company_dba,naics_name,address_api,latitude,longitude
//! LIC-1,ACME GROCERY,,Supermarkets,12 Main St,33.7490,-84.3880
//! LIC-2,CORNER MARKET,THE CORNER,Convenience Stores,9 Oak Ave,33.7612,-84.4021
//! ```
//!
//! Rows whose coordinates fail to parse as finite in-range numbers are
//! skipped with a logged warning and counted in [`ProviderSet::skipped`];
//! they never abort the load.  A file without the coordinate columns at all
//! is a fatal [`DataError::MissingColumn`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use foodshed_core::GeoPoint;

use crate::error::{DataError, DataResult};

// ── CSV record ────────────────────────────────────────────────────────────────

/// Raw row as it appears in the file.  Coordinates arrive as strings so a
/// single bad cell downgrades to a row skip instead of a hard parse error.
#[derive(Deserialize)]
struct ProviderRecord {
    #[serde(default)]
    license_number: String,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    company_dba: Option<String>,
    #[serde(default)]
    license_classification: Option<String>,
    #[serde(default)]
    naics_name: Option<String>,
    #[serde(default)]
    address_api: Option<String>,
    #[serde(default)]
    council_district: Option<String>,
    #[serde(default)]
    npu: Option<String>,
    #[serde(default)]
    disinvested_neighborhood: Option<String>,
    #[serde(default)]
    latitude: String,
    #[serde(default)]
    longitude: String,
}

// ── Public types ──────────────────────────────────────────────────────────────

/// A validated food-provider location.
#[derive(Debug, Clone)]
pub struct Provider {
    pub license:        String,
    pub name:           String,
    pub dba:            Option<String>,
    pub classification: Option<String>,
    pub category:       Option<String>,
    pub address:        Option<String>,
    pub district:       Option<String>,
    pub npu:            Option<String>,
    pub disinvested:    Option<bool>,
    pub position:       GeoPoint,
}

/// The outcome of a provider load: the kept rows plus the skip count.
#[derive(Debug, Clone)]
pub struct ProviderSet {
    pub providers: Vec<Provider>,
    /// Rows dropped for non-numeric or out-of-range coordinates.
    pub skipped: usize,
}

impl ProviderSet {
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Positions of all kept providers, in file order.
    pub fn positions(&self) -> Vec<GeoPoint> {
        self.providers.iter().map(|p| p.position).collect()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load providers from a CSV file.
pub fn load_providers_csv(path: &Path) -> DataResult<ProviderSet> {
    if !path.exists() {
        return Err(DataError::MissingInput(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    load_providers_reader(file)
}

/// Like [`load_providers_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn load_providers_reader<R: Read>(reader: R) -> DataResult<ProviderSet> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    // The coordinate columns must exist; everything else is best-effort.
    let headers = csv_reader.headers()?.clone();
    for required in ["latitude", "longitude"] {
        if !headers.iter().any(|h| h == required) {
            return Err(DataError::MissingColumn(required));
        }
    }

    let mut providers = Vec::new();
    let mut skipped = 0usize;

    for (row_idx, result) in csv_reader.deserialize::<ProviderRecord>().enumerate() {
        let row = result?;
        let Some(position) = parse_position(&row.latitude, &row.longitude) else {
            skipped += 1;
            warn!(
                row = row_idx + 2, // 1-based, counting the header line
                license = %row.license_number,
                lat = %row.latitude,
                lon = %row.longitude,
                "skipping provider row with invalid coordinates"
            );
            continue;
        };

        providers.push(Provider {
            license:        row.license_number,
            name:           row.company_name,
            dba:            none_if_blank(row.company_dba),
            classification: none_if_blank(row.license_classification),
            category:       none_if_blank(row.naics_name),
            address:        none_if_blank(row.address_api),
            district:       none_if_blank(row.council_district),
            npu:            none_if_blank(row.npu),
            disinvested:    row.disinvested_neighborhood.as_deref().and_then(normalize_bool),
            position,
        });
    }

    Ok(ProviderSet { providers, skipped })
}

/// Convert validated providers into a GeoJSON `FeatureCollection` for the
/// viewer's `/api/providers` endpoint.
pub fn to_feature_collection(providers: &[Provider]) -> geojson::FeatureCollection {
    let features = providers
        .iter()
        .map(|p| {
            let mut props = geojson::JsonObject::new();
            props.insert("license".into(), p.license.clone().into());
            props.insert("name".into(), p.name.clone().into());
            insert_opt(&mut props, "dba", &p.dba);
            insert_opt(&mut props, "classification", &p.classification);
            insert_opt(&mut props, "category", &p.category);
            insert_opt(&mut props, "address", &p.address);
            insert_opt(&mut props, "district", &p.district);
            insert_opt(&mut props, "npu", &p.npu);
            if let Some(flag) = p.disinvested {
                props.insert("disinvested".into(), flag.into());
            }

            geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                    p.position.lon,
                    p.position.lat,
                ]))),
                id: None,
                properties: Some(props),
                foreign_members: None,
            }
        })
        .collect();

    geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_position(lat: &str, lon: &str) -> Option<GeoPoint> {
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    let p = GeoPoint::new(lat, lon);
    p.is_valid().then_some(p)
}

/// Truthy-string normalization for the `disinvested_neighborhood` column.
/// Anything outside the recognized set maps to `None`.
fn normalize_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn none_if_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

fn insert_opt(props: &mut geojson::JsonObject, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        props.insert(key.into(), v.clone().into());
    }
}
