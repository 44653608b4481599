//! Extraction strategies for the Index.hr sport listing.
//!
//! Extraction is a prioritized fallback chain over one fetched listing page.
//! Each strategy either yields a populated collection or nothing, and the
//! orchestrator tries them in order until one succeeds:
//!
//! | Order | Strategy | Module | Source of truth |
//! |-------|----------|--------|-----------------|
//! | 1 | Structured data | [`structured`] | JSON-LD `ItemList` blocks |
//! | 2 | Listing cards | [`listing`] | Card markup on the listing page |
//! | 3 | Deep fetch | [`article`] | Per-article `article:published_time` meta tags |
//!
//! Failure never propagates out of [`extract`]: a transport or parse error
//! moves the chain along, a per-candidate problem skips or degrades that one
//! candidate, and the worst case is an empty collection. The caller renders
//! an output document either way.

pub mod article;
pub mod listing;
pub mod structured;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use itertools::Itertools;
use reqwest::{Client, StatusCode, redirect};
use tracing::{info, instrument, warn};

use crate::config::{RadarConfig, USER_AGENT};
use crate::models::{NewsItem, SkipReason, sort_newest_first};
use crate::utils::normalize_image_url;

/// Extraction-side failures. All variants are handled inside the chain;
/// none reach the caller of [`extract`].
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("request returned HTTP {0}")]
    Status(StatusCode),
}

/// Build the shared HTTP client: browser user-agent, fixed per-request
/// timeout, bounded redirects.
pub fn build_client(cfg: &RadarConfig) -> Result<Client, ScrapeError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(cfg.timeout)
        .redirect(redirect::Policy::limited(10))
        .build()?)
}

/// GET a page and return its body, treating non-2xx as an error.
pub(crate) async fn fetch_page(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status(status));
    }
    Ok(response.text().await?)
}

/// Parse an ISO 8601 / RFC 3339 timestamp (`Z` suffix included) and convert
/// it into the display timezone.
pub(crate) fn parse_published(raw: &str, tz: Tz) -> Result<DateTime<Tz>, SkipReason> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&tz))
        .map_err(|_| SkipReason::BadDate(raw.to_string()))
}

/// One extraction strategy over the fetched listing page.
pub(crate) trait Strategy {
    /// Name used in log lines.
    fn name(&self) -> &'static str;

    /// Produce items from the listing body. An empty vector means "nothing
    /// found here, try the next strategy".
    async fn extract(
        &self,
        client: &Client,
        cfg: &RadarConfig,
        now: &DateTime<Tz>,
        listing_html: &str,
    ) -> Result<Vec<NewsItem>, ScrapeError>;
}

/// Run the full extraction pipeline.
///
/// Fetches the listing page once, walks the strategy chain, then
/// deduplicates, orders, caps, and normalizes the winning collection.
/// Never fails: total failure yields an empty vector.
#[instrument(level = "info", skip_all, fields(url = %cfg.listing_url))]
pub async fn extract(client: &Client, cfg: &RadarConfig) -> Vec<NewsItem> {
    let now = Utc::now().with_timezone(&cfg.tz);
    extract_at(client, cfg, &now).await
}

/// [`extract`] with an injected "now", so tests get stable display labels.
pub async fn extract_at(client: &Client, cfg: &RadarConfig, now: &DateTime<Tz>) -> Vec<NewsItem> {
    let listing_html = match fetch_page(client, &cfg.listing_url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Listing fetch failed; no data from this source");
            return Vec::new();
        }
    };

    let mut items = attempt(&structured::StructuredData, client, cfg, now, &listing_html).await;
    if items.is_empty() {
        items = attempt(&listing::ListingCards, client, cfg, now, &listing_html).await;
    }
    if items.is_empty() {
        items = attempt(&article::DeepFetch, client, cfg, now, &listing_html).await;
    }

    finalize(items, cfg.max_items)
}

async fn attempt<S: Strategy>(
    strategy: &S,
    client: &Client,
    cfg: &RadarConfig,
    now: &DateTime<Tz>,
    listing_html: &str,
) -> Vec<NewsItem> {
    match strategy.extract(client, cfg, now, listing_html).await {
        Ok(items) if !items.is_empty() => {
            info!(
                strategy = strategy.name(),
                count = items.len(),
                "Strategy produced items"
            );
            items
        }
        Ok(_) => {
            info!(
                strategy = strategy.name(),
                "Strategy found nothing; trying next"
            );
            Vec::new()
        }
        Err(e) => {
            warn!(strategy = strategy.name(), error = %e, "Strategy failed; trying next");
            Vec::new()
        }
    }
}

/// Post-processing applied to whichever strategy won: deduplicate by title
/// (first occurrence wins), sort newest first with undated items last,
/// truncate to the cap, and force the fixed crop query onto image URLs.
pub(crate) fn finalize(items: Vec<NewsItem>, max_items: usize) -> Vec<NewsItem> {
    let mut items: Vec<NewsItem> = items
        .into_iter()
        .unique_by(|item| item.title.clone())
        .collect();
    sort_newest_first(&mut items);
    items.truncate(max_items);
    for item in &mut items {
        item.image_url = match item.image_url.take() {
            Some(url) if !url.trim().is_empty() => Some(normalize_image_url(&url)),
            _ => None,
        };
    }
    items
}
