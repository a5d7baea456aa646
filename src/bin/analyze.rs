//! carbonmap analysis CLI
//!
//! Submits a GeoJSON region file to the analysis service and writes the
//! resulting GeoTIFF next to it, printing the summary statistics.
//!
//! # Usage
//!
//! ```bash
//! CARBONMAP_BASE_URL=https://api.example.org \
//!   carbonmap-analyze region.geojson out.tif
//!
//! # Authenticated full computation
//! CARBONMAP_TIER=runtime CARBONMAP_TOKEN=<bearer token> \
//!   carbonmap-analyze region.geojson out.tif
//! ```
//!
//! # Environment Variables
//!
//! - `CARBONMAP_BASE_URL`: analysis service base URL (required)
//! - `CARBONMAP_TIER`: `preliminary` (default) or `runtime`
//! - `CARBONMAP_TOKEN`: bearer token, required for the runtime tier
//! - `RUST_LOG`: log filter (default: info)

use std::env;
use std::fs;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use carbonmap::client::orchestrator::execute;
use carbonmap::import::import_geojson;
use carbonmap::overlay::format_statistics;
use carbonmap::{AnalysisConfig, Credentials, HttpTransport, RegionStore, Tier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        bail!("usage: carbonmap-analyze <region.geojson> <out.tif>");
    };

    let config = AnalysisConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let tier = match env::var("CARBONMAP_TIER").as_deref() {
        Ok("runtime") => Tier::Runtime,
        Ok("preliminary") | Err(_) => Tier::Preliminary,
        Ok(other) => bail!("unknown CARBONMAP_TIER '{other}', use preliminary or runtime"),
    };
    let credentials = env::var("CARBONMAP_TOKEN").ok().map(Credentials::new);
    if tier == Tier::Runtime && credentials.is_none() {
        bail!("CARBONMAP_TOKEN must be set for the runtime tier");
    }

    let bytes = fs::read(&input).with_context(|| format!("reading {input}"))?;
    let outcome = import_geojson(&bytes, &config.limits)?;

    let mut store = RegionStore::new();
    for geometry in outcome.geometries {
        store.add(geometry);
    }
    info!(features = store.len(), "loaded region file");

    let transport = HttpTransport::new(&config)?;
    let region = store.to_feature_collection();
    let estimation = execute(&transport, tier, &region, credentials.as_ref()).await?;

    fs::write(&output, estimation.raster.bytes())
        .with_context(|| format!("writing {output}"))?;
    info!(bytes = estimation.raster.len(), path = %output, "wrote raster");

    if estimation.statistics.is_empty() {
        println!("No statistics were returned for this region.");
    } else {
        for row in format_statistics(&estimation.statistics) {
            println!("{:<30} {:>14} {}", row.name, row.value, row.unit);
        }
    }

    Ok(())
}
