//! Runtime configuration for the radar.
//!
//! Everything tunable lives in one [`RadarConfig`] that is handed to both
//! the extractor and the renderer, so tests can point the extractor at a
//! mock server and the renderer at arbitrary intervals without touching
//! globals.

use chrono_tz::Tz;
use std::time::Duration;

/// Browser user-agent sent with every request. Index.hr serves a reduced
/// page to obvious bots, so we identify as desktop Chrome.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration shared by the extractor and the renderer.
///
/// [`RadarConfig::default`] reproduces the production kiosk setup; the CLI
/// only overrides the listing URL, the item cap, and the output path.
#[derive(Debug, Clone)]
pub struct RadarConfig {
    /// Category listing page to scrape.
    pub listing_url: String,
    /// Maximum number of slides in the generated document.
    pub max_items: usize,
    /// Milliseconds each slide stays visible before the rotation advances.
    pub rotation_ms: u32,
    /// Minutes until the document forces a full reload of itself, so the
    /// kiosk picks up freshly regenerated output.
    pub reload_minutes: u32,
    /// Path the document is written to, overwritten on every run.
    pub output_path: String,
    /// Per-request timeout. A request past this is a failure for that
    /// request only.
    pub timeout: Duration,
    /// Label shown on every slide above the headline.
    pub source_label: String,
    /// Timezone all timestamps are converted into before display.
    pub tz: Tz,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://www.index.hr/sport".to_string(),
            max_items: 8,
            rotation_ms: 12_000,
            reload_minutes: 30,
            output_path: "index.html".to_string(),
            timeout: Duration::from_secs(15),
            source_label: "INDEX SPORT".to_string(),
            tz: chrono_tz::Europe::Zagreb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_kiosk_setup() {
        let cfg = RadarConfig::default();
        assert_eq!(cfg.listing_url, "https://www.index.hr/sport");
        assert_eq!(cfg.max_items, 8);
        assert_eq!(cfg.rotation_ms, 12_000);
        assert_eq!(cfg.reload_minutes, 30);
        assert_eq!(cfg.output_path, "index.html");
        assert_eq!(cfg.timeout, Duration::from_secs(15));
        assert_eq!(cfg.tz, chrono_tz::Europe::Zagreb);
    }
}
