//! Human-readable time labels for slides.
//!
//! The display label is computed once at extraction time and baked into the
//! item; the rendered document is static, so "5 minutes ago" is relative to
//! the generation instant, not the viewing instant. The bucket boundaries
//! and the exact label strings are load-bearing: the kiosk CSS sizes the
//! time column against them.

use chrono::{DateTime, TimeZone};

/// Label used when an item's publication time could not be determined.
pub const UNKNOWN_TIME: &str = "--:--";

/// Format an elapsed interval into the label shown next to a headline.
///
/// Buckets:
/// - under a minute (or a negative interval from clock skew): `just now`
/// - under an hour: `N minutes ago`, floored, never below 1
/// - under a day: `N hours ago`, floored
/// - a day or more: the absolute `%d.%m %H:%M` form of `published`
pub fn relative_label<Tz: TimeZone>(published: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let secs = now.clone().signed_duration_since(published).num_seconds();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3_600 {
        format!("{} minutes ago", (secs / 60).max(1))
    } else if secs < 86_400 {
        format!("{} hours ago", secs / 3_600)
    } else {
        published.format("%d.%m %H:%M").to_string()
    }
}

/// Format the "last updated" stamp shown in the document header.
pub fn header_stamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%d.%m.%Y - %H:%M").to_string()
}
