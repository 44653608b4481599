//! # Index Sport Radar
//!
//! Scrapes the [Index.hr sport](https://www.index.hr/sport) front page and
//! renders the freshest headlines into a static, auto-rotating HTML
//! slideshow for a wall-mounted kiosk display.
//!
//! ## Architecture
//!
//! Two components run back to back, no feedback loop:
//!
//! 1. **Extractor** ([`scrapers`]): one listing-page fetch, then a
//!    prioritized chain of strategies (JSON-LD structured data, listing-card
//!    markup, per-article deep fetch) until one yields items; the winning
//!    collection is deduplicated, ordered newest-first, capped, and its
//!    image URLs normalized.
//! 2. **Renderer** ([`outputs::slideshow`]): a pure transform from the item
//!    collection plus a generation instant to one self-contained HTML
//!    document.
//!
//! The one deliberate reliability contract: every run writes an output
//! document. Extraction failures degrade to fewer or zero items, never to a
//! missing file; an empty collection renders as a single placeholder slide.

pub mod cli;
pub mod config;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod timefmt;
pub mod utils;
