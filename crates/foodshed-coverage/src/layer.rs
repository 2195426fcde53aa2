//! Layer keys, file naming, and output-directory cataloguing.
//!
//! Each persisted layer corresponds to exactly one `(mode, distance)` pair.
//! File names are the lookup key — `walk_coverage_0.3mi.geojson` — so the
//! viewer can locate layers deterministically and a directory scan can
//! report what exists without opening a single file.

use std::collections::BTreeSet;
use std::path::Path;

use foodshed_core::{DistanceBand, TravelMode};

use crate::error::CoverageResult;

// ── LayerKey ──────────────────────────────────────────────────────────────────

/// Identity of one coverage layer: a travel mode and a distance band.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct LayerKey {
    pub mode: TravelMode,
    pub band: DistanceBand,
}

impl LayerKey {
    pub fn new(mode: TravelMode, band: DistanceBand) -> Self {
        Self { mode, band }
    }

    /// File name for this key, e.g. `walk_coverage_0.3mi.geojson`.
    pub fn file_name(&self, variant: LayerVariant) -> String {
        format!("{}_{}_{}mi.geojson", self.mode, variant.as_str(), self.band)
    }

    /// Parse a file name produced by [`file_name`](Self::file_name).
    /// Returns `None` for anything that is not a layer file.
    pub fn parse_file_name(name: &str) -> Option<(LayerKey, LayerVariant)> {
        let stem = name.strip_suffix(".geojson")?;
        let mut parts = stem.splitn(3, '_');

        let mode: TravelMode = parts.next()?.parse().ok()?;
        let variant = match parts.next()? {
            "coverage"  => LayerVariant::Coverage,
            "uncovered" => LayerVariant::Uncovered,
            _ => return None,
        };
        let miles: f64 = parts.next()?.strip_suffix("mi")?.parse().ok()?;
        let band = DistanceBand::from_miles(miles).ok()?;

        Some((LayerKey { mode, band }, variant))
    }
}

impl std::fmt::Display for LayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {} mi", self.mode, self.band)
    }
}

// ── LayerVariant ──────────────────────────────────────────────────────────────

/// Which side of the boundary a layer describes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum LayerVariant {
    /// Area within the travel distance of at least one provider.
    Coverage,
    /// Boundary remainder outside every provider's reach.
    Uncovered,
}

impl LayerVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            LayerVariant::Coverage  => "coverage",
            LayerVariant::Uncovered => "uncovered",
        }
    }
}

// ── LayerCatalog ──────────────────────────────────────────────────────────────

/// What a coverage directory currently contains, from a single scan.
///
/// Missing layers are the interesting case: the viewer uses the catalog to
/// distinguish "not generated yet" from transient read errors.
#[derive(Debug, Default, Clone)]
pub struct LayerCatalog {
    present: BTreeSet<(LayerKey, LayerVariant)>,
}

impl LayerCatalog {
    /// Scan `dir` for layer files.  A directory that does not exist yet is
    /// an empty catalog, not an error — nothing has been precomputed.
    pub fn scan(dir: &Path) -> CoverageResult<LayerCatalog> {
        let mut present = BTreeSet::new();
        if !dir.exists() {
            return Ok(LayerCatalog { present });
        }
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if let Some(parsed) = entry
                .file_name()
                .to_str()
                .and_then(LayerKey::parse_file_name)
            {
                present.insert(parsed);
            }
        }
        Ok(LayerCatalog { present })
    }

    pub fn contains(&self, key: LayerKey, variant: LayerVariant) -> bool {
        self.present.contains(&(key, variant))
    }

    /// Keys with a coverage file present, ascending.
    pub fn coverage_keys(&self) -> impl Iterator<Item = LayerKey> + '_ {
        self.present
            .iter()
            .filter(|(_, v)| *v == LayerVariant::Coverage)
            .map(|(k, _)| *k)
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }
}
