//! Deep-fetch strategy: per-article metadata probes.
//!
//! The last resort when neither the JSON-LD payload nor the card markup
//! settles the question of *when* each story ran. Candidate cards (headline,
//! link, image) come off the listing page, then every candidate's own page
//! is fetched sequentially and its `article:published_time` meta tag read.
//! A failed probe degrades that single item to the unknown-time sentinel;
//! the batch never aborts.

use chrono::DateTime;
use chrono_tz::Tz;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::{ScrapeError, Strategy, fetch_page, parse_published};
use crate::config::RadarConfig;
use crate::models::{NewsItem, SkipReason};

static CARDS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".grid-item, .first-news-holder").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".title").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());
static PUBLISHED_META: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="article:published_time"]"#).unwrap());

/// A card picked off the listing page, pending its metadata probe.
#[derive(Debug, PartialEq)]
struct Candidate {
    title: String,
    link: String,
    image: Option<String>,
}

/// Why one candidate's probe produced no timestamp.
#[derive(Debug, thiserror::Error)]
enum ProbeError {
    #[error(transparent)]
    Fetch(#[from] ScrapeError),
    #[error(transparent)]
    Skip(#[from] SkipReason),
}

pub(crate) struct DeepFetch;

impl Strategy for DeepFetch {
    fn name(&self) -> &'static str {
        "deep-fetch"
    }

    async fn extract(
        &self,
        client: &Client,
        cfg: &RadarConfig,
        now: &DateTime<Tz>,
        listing_html: &str,
    ) -> Result<Vec<NewsItem>, ScrapeError> {
        // Cap candidates first: at most max_items secondary fetches per run.
        let candidates = select_candidates(listing_html, &cfg.listing_url, cfg.max_items);
        debug!(count = candidates.len(), "Selected deep-fetch candidates");

        let tz = cfg.tz;
        let items: Vec<NewsItem> = stream::iter(candidates)
            .then(|candidate| async move {
                let published = match fetch_published(client, &candidate.link, tz).await {
                    Ok(published) => Some(published),
                    Err(e) => {
                        warn!(
                            url = %candidate.link,
                            error = %e,
                            "Article probe failed; keeping item with unknown time"
                        );
                        None
                    }
                };
                NewsItem::new(candidate.title, candidate.image, published, now)
            })
            .collect()
            .await;
        Ok(items)
    }
}

fn select_candidates(listing_html: &str, listing_url: &str, cap: usize) -> Vec<Candidate> {
    let document = Html::parse_document(listing_html);
    let base = Url::parse(listing_url).ok();
    let mut candidates = Vec::new();
    for card in document.select(&CARDS) {
        if candidates.len() >= cap {
            break;
        }
        match convert(card, base.as_ref()) {
            Ok(candidate) => candidates.push(candidate),
            Err(reason) => debug!(%reason, "Skipping deep-fetch candidate"),
        }
    }
    candidates
}

fn convert(card: ElementRef<'_>, base: Option<&Url>) -> Result<Candidate, SkipReason> {
    let title = card
        .select(&TITLE)
        .next()
        .map(card_text)
        .filter(|t| !t.is_empty())
        .ok_or(SkipReason::MissingTitle)?;
    let href = card
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or(SkipReason::MissingLink)?;
    let link = resolve(base, href);
    let image = card
        .select(&IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| resolve(base, src));
    Ok(Candidate { title, link, image })
}

fn resolve(base: Option<&Url>, href: &str) -> String {
    base.and_then(|b| b.join(href).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| href.to_string())
}

fn card_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fetch one article page and read its publication timestamp.
async fn fetch_published(client: &Client, url: &str, tz: Tz) -> Result<DateTime<Tz>, ProbeError> {
    let body = fetch_page(client, url).await?;
    Ok(published_from_meta(&body, tz)?)
}

fn published_from_meta(body: &str, tz: Tz) -> Result<DateTime<Tz>, SkipReason> {
    let document = Html::parse_document(body);
    let raw = document
        .select(&PUBLISHED_META)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .ok_or(SkipReason::MissingDate)?;
    parse_published(raw, tz)
}
