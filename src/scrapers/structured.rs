//! Structured-data strategy: JSON-LD `ItemList` blocks.
//!
//! Index.hr embeds a machine-readable description of the listing as
//! `<script type="application/ld+json">` payloads. When an `ItemList` block
//! is present this is the most precise source available: exact headlines and
//! full publication timestamps, no secondary fetches. Entries missing a
//! headline or a parsable `datePublished` are skipped individually.

use chrono::DateTime;
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::debug;

use super::{ScrapeError, Strategy, parse_published};
use crate::config::RadarConfig;
use crate::models::{NewsItem, SkipReason};
use crate::utils::truncate_for_log;

static LD_JSON: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

/// A JSON-LD `ItemList` payload, the subset of schema.org we care about.
#[derive(Debug, Deserialize)]
struct LdItemList {
    #[serde(rename = "@type", default)]
    kind: String,
    #[serde(rename = "itemListElement", default)]
    elements: Vec<LdElement>,
}

#[derive(Debug, Deserialize)]
struct LdElement {
    #[serde(default)]
    item: Option<LdArticle>,
}

#[derive(Debug, Deserialize)]
struct LdArticle {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    headline: Option<String>,
    #[serde(default)]
    image: Option<LdImage>,
    #[serde(rename = "datePublished", default)]
    date_published: Option<String>,
}

/// `image` appears in the wild as a bare URL, an `ImageObject`, or a list
/// of either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LdImage {
    Url(String),
    Object {
        #[serde(default)]
        url: Option<String>,
    },
    Many(Vec<LdImage>),
}

impl LdImage {
    fn url(&self) -> Option<&str> {
        match self {
            LdImage::Url(url) => Some(url),
            LdImage::Object { url } => url.as_deref(),
            LdImage::Many(images) => images.first().and_then(LdImage::url),
        }
    }
}

pub(crate) struct StructuredData;

impl Strategy for StructuredData {
    fn name(&self) -> &'static str {
        "structured-data"
    }

    async fn extract(
        &self,
        _client: &Client,
        cfg: &RadarConfig,
        now: &DateTime<Tz>,
        listing_html: &str,
    ) -> Result<Vec<NewsItem>, ScrapeError> {
        Ok(collect_items(listing_html, cfg.tz, now))
    }
}

fn collect_items(listing_html: &str, tz: Tz, now: &DateTime<Tz>) -> Vec<NewsItem> {
    let document = Html::parse_document(listing_html);
    let mut items = Vec::new();
    for script in document.select(&LD_JSON) {
        let payload = script.text().collect::<String>();
        let payload = payload.trim();
        let list: LdItemList = match serde_json::from_str(payload) {
            Ok(list) => list,
            Err(e) => {
                debug!(
                    error = %e,
                    payload = %truncate_for_log(payload, 200),
                    "Skipping unparsable JSON-LD block"
                );
                continue;
            }
        };
        if list.kind != "ItemList" {
            debug!(kind = %list.kind, "Skipping non-ItemList JSON-LD block");
            continue;
        }
        for element in list.elements {
            match convert(element, tz, now) {
                Ok(item) => items.push(item),
                Err(reason) => debug!(%reason, "Skipping structured-data entry"),
            }
        }
    }
    items
}

/// Turn one `itemListElement` entry into an item. Headline and timestamp
/// are both mandatory here; the later strategies are the ones that tolerate
/// unknown times.
fn convert(element: LdElement, tz: Tz, now: &DateTime<Tz>) -> Result<NewsItem, SkipReason> {
    let article = element.item.ok_or(SkipReason::MissingTitle)?;
    let title = article
        .name
        .or(article.headline)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(SkipReason::MissingTitle)?;
    let raw_date = article.date_published.ok_or(SkipReason::MissingDate)?;
    let published = parse_published(&raw_date, tz)?;
    let image = article.image.as_ref().and_then(LdImage::url).map(str::to_string);
    Ok(NewsItem::new(title, image, Some(published), now))
}
