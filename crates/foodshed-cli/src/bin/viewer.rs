//! Interactive map viewer server.
//!
//! Loads providers and overlays once, then serves the embedded single-page
//! map plus the JSON API on the configured host/port.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use foodshed_cli::server::{router, ViewerPaths, ViewerState};
use foodshed_cli::telemetry;

#[derive(Parser, Debug)]
#[command(name = "viewer", about = "Interactive food-provider coverage map.")]
struct Args {
    /// Bind address.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port.
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Provider CSV with latitude/longitude columns.
    #[arg(long, default_value = "food_providers.csv")]
    csv: PathBuf,

    /// City boundary GeoJSON.
    #[arg(long, default_value = "city_limits.geojson")]
    boundary: PathBuf,

    /// Transit routes GeoJSON overlay (optional).
    #[arg(long)]
    transit: Option<PathBuf>,

    /// Directory of precomputed coverage layers.
    #[arg(long = "coverage-dir", default_value = "coverage_layers")]
    coverage_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let args = Args::parse();

    let state = ViewerState::from_files(&ViewerPaths {
        csv:          args.csv,
        boundary:     args.boundary,
        transit:      args.transit,
        coverage_dir: args.coverage_dir,
    })?;

    let app = router(Arc::new(state));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(addr = %addr, "viewer listening");
    println!("Viewer running at http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
