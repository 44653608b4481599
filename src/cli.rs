//! Command-line interface definitions for Index Sport Radar.
//!
//! The tool is deliberately configuration-free: a bare invocation reproduces
//! the production kiosk setup. The few flags here exist so an operator can
//! point the scraper at a different category page or relocate the output
//! file without rebuilding.

use clap::Parser;

use crate::config::RadarConfig;

/// Command-line arguments for the Index Sport Radar slideshow generator.
///
/// # Examples
///
/// ```sh
/// # Production kiosk run
/// index_sport_radar
///
/// # Write elsewhere, show more slides
/// index_sport_radar -o /var/www/kiosk/index.html --max-items 10
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Listing page to scrape
    #[arg(short = 'u', long, default_value = "https://www.index.hr/sport")]
    pub listing_url: String,

    /// Maximum number of slides in the generated document
    #[arg(short = 'n', long, default_value_t = 8)]
    pub max_items: usize,

    /// Path the HTML document is written to (overwritten each run)
    #[arg(short, long, default_value = "index.html")]
    pub output: String,
}

impl Cli {
    /// Fold the CLI overrides into the default configuration.
    pub fn into_config(self) -> RadarConfig {
        RadarConfig {
            listing_url: self.listing_url,
            max_items: self.max_items,
            output_path: self.output,
            ..RadarConfig::default()
        }
    }
}
