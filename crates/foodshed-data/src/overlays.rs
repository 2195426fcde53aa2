//! Boundary and overlay GeoJSON loaders.
//!
//! The boundary file may be a `FeatureCollection` (first feature wins), a
//! bare `Feature`, or a bare `Geometry`; whichever shape it takes, the
//! result is a `MultiPolygon` in WGS-84.  Transit and other display-only
//! overlays are loaded as parsed GeoJSON and passed through to the viewer
//! verbatim.

use std::path::Path;

use geo_types::{Geometry, MultiPolygon};
use geojson::GeoJson;

use crate::error::{DataError, DataResult};

/// Load a boundary polygon, accepting the common GeoJSON wrappings.
pub fn load_boundary(path: &Path) -> DataResult<MultiPolygon<f64>> {
    let gj = read_geojson(path)?;

    let value = match gj {
        GeoJson::FeatureCollection(fc) => fc
            .features
            .into_iter()
            .find_map(|f| f.geometry)
            .ok_or_else(|| DataError::EmptyOverlay(path.to_path_buf()))?
            .value,
        GeoJson::Feature(f) => {
            f.geometry
                .ok_or_else(|| DataError::EmptyOverlay(path.to_path_buf()))?
                .value
        }
        GeoJson::Geometry(g) => g.value,
    };

    match Geometry::<f64>::try_from(value)? {
        Geometry::Polygon(p) => Ok(MultiPolygon(vec![p])),
        Geometry::MultiPolygon(mp) => Ok(mp),
        other => Err(DataError::UnexpectedGeometry {
            path: path.to_path_buf(),
            got: geometry_kind(&other).to_string(),
        }),
    }
}

/// Load an overlay file as parsed GeoJSON without interpreting it.
pub fn load_overlay_raw(path: &Path) -> DataResult<GeoJson> {
    read_geojson(path)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_geojson(path: &Path) -> DataResult<GeoJson> {
    if !path.exists() {
        return Err(DataError::MissingInput(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(text.parse::<GeoJson>()?)
}

fn geometry_kind(g: &Geometry<f64>) -> &'static str {
    match g {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
