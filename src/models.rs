//! Data model for extracted articles.
//!
//! One extraction run produces a short, immutable list of [`NewsItem`]s that
//! the renderer turns into slides and then discards. Nothing is persisted
//! across runs.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::timefmt::{self, UNKNOWN_TIME};

/// One article surfaced on the slideshow.
///
/// Constructed once per extraction run via [`NewsItem::new`], which bakes
/// the display label in at that moment. The rendered document is static, so
/// the label never updates afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    /// Headline. Never empty: candidates without one are dropped upstream.
    pub title: String,
    /// Absolute image URL. `None` or blank means the renderer substitutes
    /// its placeholder image.
    pub image_url: Option<String>,
    /// Publication instant in the display timezone. `None` when no parsable
    /// timestamp was found for the article.
    pub published_at: Option<DateTime<Tz>>,
    /// Human-readable time label, computed once from `published_at` and the
    /// generation instant.
    pub display_time: String,
}

impl NewsItem {
    /// Build an item, deriving the display label from `published_at`
    /// relative to `now`. An undated item gets the sentinel label.
    pub fn new(
        title: String,
        image_url: Option<String>,
        published_at: Option<DateTime<Tz>>,
        now: &DateTime<Tz>,
    ) -> Self {
        let display_time = match &published_at {
            Some(published) => timefmt::relative_label(published, now),
            None => UNKNOWN_TIME.to_string(),
        };
        Self {
            title,
            image_url,
            published_at,
            display_time,
        }
    }

    /// Sort key for newest-first ordering. Undated items sort last: an
    /// article with a verified timestamp always outranks one whose age is
    /// unknown.
    pub fn recency_key(&self) -> Option<DateTime<Tz>> {
        self.published_at
    }
}

/// Sort newest first; undated items go to the bottom.
pub fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));
}

/// Why a scraped candidate did not become a [`NewsItem`].
///
/// Keeping the cause explicit lets the strategies log it and lets tests
/// tell "no headline" apart from "bad timestamp".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("candidate has no headline")]
    MissingTitle,
    #[error("candidate has no image")]
    MissingImage,
    #[error("candidate has no article link")]
    MissingLink,
    #[error("candidate has no publication date")]
    MissingDate,
    #[error("unparsable publication date: {0}")]
    BadDate(String),
}
