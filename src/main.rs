//! Binary entry point: scrape, render, write, exit.
//!
//! Invoked periodically by an external scheduler (cron on the kiosk host).
//! Each run performs one extraction cycle and overwrites the output
//! document. The renderer runs even when extraction produced nothing, so an
//! output file always exists.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use index_sport_radar::cli::Cli;
use index_sport_radar::outputs::slideshow;
use index_sport_radar::scrapers;
use index_sport_radar::utils::ensure_writable_parent;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("index_sport_radar starting up");

    let cfg = Cli::parse().into_config();
    debug!(?cfg, "Resolved configuration");

    // Early check: fail before any network work if the output can't land.
    if let Err(e) = ensure_writable_parent(&cfg.output_path).await {
        error!(
            path = %cfg.output_path,
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = scrapers::build_client(&cfg)?;
    let items = scrapers::extract(&client, &cfg).await;
    info!(count = items.len(), "Extraction finished");

    // Always render, even with zero items: the placeholder slide keeps the
    // kiosk alive and the reload script keeps it checking back.
    let generated_at = Utc::now().with_timezone(&cfg.tz);
    let document = slideshow::render(&items, &generated_at, &cfg);

    tokio::fs::write(&cfg.output_path, &document).await?;
    info!(
        path = %cfg.output_path,
        bytes = document.len(),
        slides = items.len().max(1),
        "Wrote slideshow document"
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
