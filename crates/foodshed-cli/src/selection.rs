//! Distance and mode selection for the precompute CLI.
//!
//! Precedence, matching the documented flag behavior:
//!
//! 1. `--distance-miles 0.4` — a single band, overrides everything else;
//! 2. `--distances 0.1,0.3,0.7` — an explicit list;
//! 3. `--distance-start/--distance-end/--distance-step` — an inclusive
//!    range walk, defaulting to the full 0.1–1.0 × 0.1 grid.
//!
//! Every path rounds to tenths, deduplicates, sorts, and validates against
//! the supported band range, so downstream code only ever sees clean
//! `DistanceBand` lists.

use anyhow::{bail, Context, Result};

use foodshed_core::{DistanceBand, TravelMode};

/// The raw distance flags as clap hands them over.
#[derive(Debug, Clone, Copy)]
pub struct DistanceFlags<'a> {
    pub single: Option<f64>,
    pub list:   Option<&'a str>,
    pub start:  f64,
    pub end:    f64,
    pub step:   f64,
}

/// Resolve the distance flags into a sorted, deduplicated band list.
pub fn resolve_distances(flags: DistanceFlags<'_>) -> Result<Vec<DistanceBand>> {
    if let Some(miles) = flags.single {
        let band = DistanceBand::from_miles(miles)
            .with_context(|| format!("--distance-miles {miles}"))?;
        return Ok(vec![band]);
    }

    if let Some(list) = flags.list.filter(|l| !l.trim().is_empty()) {
        let mut bands = Vec::new();
        for token in list.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let miles: f64 = token
                .parse()
                .with_context(|| format!("--distances entry {token:?} is not a number"))?;
            bands.push(
                DistanceBand::from_miles(miles)
                    .with_context(|| format!("--distances entry {token:?}"))?,
            );
        }
        if bands.is_empty() {
            bail!("--distances produced no values");
        }
        bands.sort_unstable();
        bands.dedup();
        return Ok(bands);
    }

    if flags.step <= 0.0 {
        bail!("--distance-step must be positive, got {}", flags.step);
    }

    let mut bands = Vec::new();
    let mut current = flags.start;
    while current <= flags.end + 1e-9 {
        bands.push(
            DistanceBand::from_miles(current)
                .with_context(|| format!("distance range value {current:.2}"))?,
        );
        current += flags.step;
    }
    if bands.is_empty() {
        bail!(
            "distance range {:.1}..{:.1} step {:.1} selects nothing",
            flags.start,
            flags.end,
            flags.step
        );
    }
    bands.sort_unstable();
    bands.dedup();
    Ok(bands)
}

/// Parse the `--modes` list into network travel modes.
///
/// Euclidean is rejected here: it needs no precompute, and silently
/// accepting it would produce a layer file nothing ever reads.
pub fn resolve_modes(list: &str) -> Result<Vec<TravelMode>> {
    let mut modes = Vec::new();
    for token in list.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let mode: TravelMode = token
            .parse()
            .map_err(|e| anyhow::anyhow!("--modes: {e}"))?;
        if !mode.is_network() {
            bail!("--modes: {mode} has no precomputed layers (it is computed on the fly)");
        }
        if !modes.contains(&mode) {
            modes.push(mode);
        }
    }
    if modes.is_empty() {
        bail!("--modes selected nothing; expected walk, drive, or both");
    }
    Ok(modes)
}
