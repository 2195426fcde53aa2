//! Offline coverage precompute pipeline.
//!
//! Walks the requested mode × distance cartesian product, building one road
//! network per mode and persisting a coverage/uncovered GeoJSON pair per
//! combination plus a run summary.  A mode whose network cannot be built is
//! reported and skipped; the remaining modes still run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use foodshed_cli::selection::{resolve_distances, resolve_modes, DistanceFlags};
use foodshed_cli::telemetry;
use foodshed_coverage::{run_mode, LayerStore, RunSummary};
use foodshed_data::{load_boundary, load_providers_csv};
use foodshed_network::{load_from_pbf, RoutingProfile};

#[derive(Parser, Debug)]
#[command(
    name = "precompute",
    about = "Precompute walk/drive network coverage masks around food providers."
)]
struct Args {
    /// Provider CSV with latitude/longitude columns.
    #[arg(long, default_value = "food_providers.csv")]
    csv: PathBuf,

    /// City boundary GeoJSON.
    #[arg(long, default_value = "city_limits.geojson")]
    boundary: PathBuf,

    /// OSM PBF extract covering the boundary.
    #[arg(long = "osm-pbf")]
    osm_pbf: PathBuf,

    /// Directory for GeoJSON outputs.
    #[arg(long = "output-dir", default_value = "coverage_layers")]
    output_dir: PathBuf,

    /// Comma-separated network modes to compute: walk, drive.
    #[arg(long, default_value = "walk,drive")]
    modes: String,

    /// Single network travel distance in miles (overrides range flags).
    #[arg(long = "distance-miles")]
    distance_miles: Option<f64>,

    /// Comma-separated distance list in miles, e.g. 0.1,0.3,0.7.
    #[arg(long)]
    distances: Option<String>,

    /// Distance range start (miles).
    #[arg(long = "distance-start", default_value_t = 0.1)]
    distance_start: f64,

    /// Distance range end (miles).
    #[arg(long = "distance-end", default_value_t = 1.0)]
    distance_end: f64,

    /// Distance range increment (miles).
    #[arg(long = "distance-step", default_value_t = 0.1)]
    distance_step: f64,
}

fn main() -> Result<()> {
    telemetry::init();
    let args = Args::parse();

    let modes = resolve_modes(&args.modes)?;
    let bands = resolve_distances(DistanceFlags {
        single: args.distance_miles,
        list:   args.distances.as_deref(),
        start:  args.distance_start,
        end:    args.distance_end,
        step:   args.distance_step,
    })?;

    let providers = load_providers_csv(&args.csv)
        .with_context(|| format!("loading provider CSV {}", args.csv.display()))?;
    if providers.skipped > 0 {
        warn!(skipped = providers.skipped, "dropped provider rows with bad coordinates");
    }
    if providers.is_empty() {
        bail!("provider CSV {} contains no usable rows", args.csv.display());
    }

    let boundary = load_boundary(&args.boundary)
        .with_context(|| format!("loading boundary {}", args.boundary.display()))?;

    info!(
        providers = providers.len(),
        modes = modes.len(),
        distances = bands.len(),
        output_dir = %args.output_dir.display(),
        "starting precompute run"
    );

    let store = LayerStore::new(&args.output_dir);
    let positions = providers.positions();

    // One mode at a time: a failed network build or coverage computation is
    // reported and isolated so the other modes still produce their layers.
    let mut mode_stats = BTreeMap::new();
    for &mode in &modes {
        let profile = match RoutingProfile::try_from(mode) {
            Ok(p) => p,
            Err(e) => {
                error!(mode = %mode, error = %e, "skipping mode");
                continue;
            }
        };

        info!(mode = %mode, pbf = %args.osm_pbf.display(), "building road network");
        let network = match load_from_pbf(&args.osm_pbf, profile, Some(&boundary)) {
            Ok(n) => n,
            Err(e) => {
                error!(mode = %mode, error = %e, "skipping mode: network unavailable");
                continue;
            }
        };

        match run_mode(&store, mode, &network, &positions, &boundary, &bands) {
            Ok(stats) => {
                mode_stats.insert(mode.to_string(), stats);
            }
            Err(e) => {
                error!(mode = %mode, error = %e, "skipping mode: coverage computation failed");
            }
        }
    }

    if mode_stats.is_empty() {
        bail!("no requested mode produced coverage layers");
    }

    let summary = RunSummary {
        distances_miles: bands.iter().map(|b| b.miles()).collect(),
        provider_count:  providers.len(),
        modes:           mode_stats,
    };
    let summary_path = store.write_summary(&summary)?;
    info!(path = %summary_path.display(), "wrote run summary");

    println!();
    println!("{:<8} {:<10} {:>14} {:>8}", "Mode", "Distance", "Covered km²", "Ratio");
    println!("{}", "-".repeat(44));
    for (mode, stats) in &summary.modes {
        for (dist, s) in stats {
            println!(
                "{:<8} {:<10} {:>14.3} {:>8.3}",
                mode,
                format!("{dist} mi"),
                s.covered_area_sq_m / 1e6,
                s.coverage_ratio
            );
        }
    }

    Ok(())
}
