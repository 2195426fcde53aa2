//! Layer persistence: GeoJSON files plus the run summary.
//!
//! All writes go through write-then-rename so a crashed or re-run
//! precompute never leaves a partial artifact where the viewer would find
//! it.  Re-running a combination overwrites the prior file in place.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use geo_types::{Geometry, MultiPolygon};
use geojson::{Feature, FeatureCollection, GeoJson};
use serde::{Deserialize, Serialize};

use crate::error::{CoverageError, CoverageResult};
use crate::layer::{LayerCatalog, LayerKey, LayerVariant};

/// File name of the per-run statistics document.
pub const SUMMARY_FILE: &str = "network_coverage_summary.json";

// ── Summary types ─────────────────────────────────────────────────────────────

/// Per-(mode, distance) statistics recorded by a precompute run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerStats {
    pub coverage_path:       String,
    pub uncovered_path:      String,
    pub unique_origin_nodes: usize,
    pub covered_area_sq_m:   f64,
    pub uncovered_area_sq_m: f64,
    pub coverage_ratio:      f64,
}

/// The whole-run summary document, keyed mode → distance label → stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub distances_miles: Vec<f64>,
    pub provider_count:  usize,
    pub modes:           BTreeMap<String, BTreeMap<String, LayerStats>>,
}

// ── LayerStore ────────────────────────────────────────────────────────────────

/// Reads and writes coverage layers under one output directory.
pub struct LayerStore {
    dir: PathBuf,
}

impl LayerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic path of a layer file, whether or not it exists.
    pub fn path_for(&self, key: LayerKey, variant: LayerVariant) -> PathBuf {
        self.dir.join(key.file_name(variant))
    }

    /// Scan the directory for existing layers.
    pub fn catalog(&self) -> CoverageResult<LayerCatalog> {
        LayerCatalog::scan(&self.dir)
    }

    /// Persist a layer geometry, overwriting any prior file for the key.
    pub fn write_layer(
        &self,
        key: LayerKey,
        variant: LayerVariant,
        geometry: &MultiPolygon<f64>,
    ) -> CoverageResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key, variant);
        let stem = key.file_name(variant);
        let stem = stem.trim_end_matches(".geojson");

        let mut props = geojson::JsonObject::new();
        props.insert("name".into(), stem.into());

        let feature = Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(geometry))),
            id: None,
            properties: Some(props),
            foreign_members: None,
        };
        let fc = GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        });

        write_atomic(&path, fc.to_string().as_bytes())?;
        Ok(path)
    }

    /// Load a persisted layer geometry.
    ///
    /// A missing file is [`CoverageError::MissingLayer`], the variant the
    /// viewer turns into its "run the precompute step" prompt.
    pub fn read_layer(
        &self,
        key: LayerKey,
        variant: LayerVariant,
    ) -> CoverageResult<MultiPolygon<f64>> {
        let path = self.path_for(key, variant);
        if !path.exists() {
            return Err(CoverageError::MissingLayer { key, path });
        }

        let gj = std::fs::read_to_string(&path)?.parse::<GeoJson>()?;
        let value = match gj {
            GeoJson::FeatureCollection(fc) => fc
                .features
                .into_iter()
                .find_map(|f| f.geometry)
                .ok_or_else(|| CoverageError::UnexpectedGeometry(path.clone()))?
                .value,
            GeoJson::Feature(f) => {
                f.geometry
                    .ok_or_else(|| CoverageError::UnexpectedGeometry(path.clone()))?
                    .value
            }
            GeoJson::Geometry(g) => g.value,
        };

        match Geometry::<f64>::try_from(value)? {
            Geometry::Polygon(p) => Ok(MultiPolygon(vec![p])),
            Geometry::MultiPolygon(mp) => Ok(mp),
            _ => Err(CoverageError::UnexpectedGeometry(path)),
        }
    }

    /// Persist the run summary document.
    pub fn write_summary(&self, summary: &RunSummary) -> CoverageResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(SUMMARY_FILE);
        let body = serde_json::to_vec_pretty(summary)?;
        write_atomic(&path, &body)?;
        Ok(path)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Write to a sibling temp file, then rename over the target.  Rename within
/// one directory is atomic on the platforms this tool targets.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("layer.geojson");
    let tmp = path.with_file_name(format!("{file_name}.tmp"));
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)
}
