//! Listing-card fallback strategy.
//!
//! When the listing page carries no usable JSON-LD, the card markup itself
//! still has headlines and images: `.grid-item` for the grid and
//! `.first-news-holder` for the lead story. The cards carry no publication
//! time, so every item from this strategy gets the unknown-time sentinel.

use chrono::DateTime;
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::{ScrapeError, Strategy};
use crate::config::RadarConfig;
use crate::models::{NewsItem, SkipReason};

static CARDS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".grid-item, .first-news-holder").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".title").unwrap());
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());

pub(crate) struct ListingCards;

impl Strategy for ListingCards {
    fn name(&self) -> &'static str {
        "listing-cards"
    }

    async fn extract(
        &self,
        _client: &Client,
        cfg: &RadarConfig,
        now: &DateTime<Tz>,
        listing_html: &str,
    ) -> Result<Vec<NewsItem>, ScrapeError> {
        Ok(collect_items(listing_html, &cfg.listing_url, now))
    }
}

fn collect_items(listing_html: &str, listing_url: &str, now: &DateTime<Tz>) -> Vec<NewsItem> {
    let document = Html::parse_document(listing_html);
    let base = Url::parse(listing_url).ok();
    let mut items = Vec::new();
    for card in document.select(&CARDS) {
        match convert(card, base.as_ref(), now) {
            Ok(item) => items.push(item),
            Err(reason) => debug!(%reason, "Skipping listing card"),
        }
    }
    items
}

fn convert(
    card: ElementRef<'_>,
    base: Option<&Url>,
    now: &DateTime<Tz>,
) -> Result<NewsItem, SkipReason> {
    let title = card
        .select(&TITLE)
        .next()
        .map(card_text)
        .filter(|t| !t.is_empty())
        .ok_or(SkipReason::MissingTitle)?;
    let src = card
        .select(&IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .ok_or(SkipReason::MissingImage)?;
    let image_url = match base {
        Some(base) => base.join(src).map(|u| u.to_string()).unwrap_or_else(|_| src.to_string()),
        None => src.to_string(),
    };
    Ok(NewsItem::new(title, Some(image_url), None, now))
}

/// Collect an element's text with whitespace collapsed, the way the card
/// titles are meant to read.
fn card_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
