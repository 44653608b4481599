//! Static slideshow renderer.
//!
//! A pure presentation transform: items plus a generation instant in, one
//! self-contained HTML document out. The renderer performs no I/O and never
//! fails; an empty collection is replaced by a single placeholder slide so
//! the kiosk always has something to display. Rotation and the periodic
//! self-reload (how the kiosk picks up regenerated output) run client-side
//! from the embedded script.

use chrono::DateTime;
use chrono_tz::Tz;
use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::config::RadarConfig;
use crate::models::NewsItem;
use crate::timefmt::{self, UNKNOWN_TIME};

/// Title of the synthetic slide shown when extraction came back empty.
pub const PLACEHOLDER_TITLE: &str = "No news available right now (scraper check)";

/// Inline SVG shown when an item has no image URL at all. Broken remote
/// images are handled separately by the `onerror` hide.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;utf8,\
    <svg xmlns='http://www.w3.org/2000/svg' width='1200' height='630'>\
    <rect width='100%25' height='100%25' fill='%23111'/></svg>";

/// Render the slideshow document.
///
/// Deterministic for fixed inputs: the only timestamp in the output is the
/// caller-supplied `generated_at`. Exactly the first slide is marked active.
pub fn render(items: &[NewsItem], generated_at: &DateTime<Tz>, cfg: &RadarConfig) -> String {
    let fallback = [NewsItem {
        title: PLACEHOLDER_TITLE.to_string(),
        image_url: None,
        published_at: None,
        display_time: UNKNOWN_TIME.to_string(),
    }];
    let items = if items.is_empty() { &fallback[..] } else { items };

    let mut slides = String::new();
    for (i, item) in items.iter().enumerate() {
        let class = if i == 0 { "slide active" } else { "slide" };
        let img_src = item
            .image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE);
        write!(
            slides,
            r#"
    <div class="{class}">
        <div class="image-container">
            <img src="{img}" onerror="this.style.display='none'">
            <div class="img-overlay"></div>
        </div>
        <div class="content-box">
            <div class="meta-line">
                <span class="source">{source}</span>
                <span class="pub-time">{time}</span>
            </div>
            <div class="title">{title}</div>
        </div>
    </div>"#,
            img = encode_double_quoted_attribute(img_src),
            source = encode_text(&cfg.source_label),
            time = encode_text(&item.display_time),
            title = encode_text(&item.title),
        )
        .unwrap();
    }

    page(&slides, &timefmt::header_stamp(generated_at), cfg)
}

fn page(slides: &str, stamp: &str, cfg: &RadarConfig) -> String {
    let rotation_ms = cfg.rotation_ms;
    let reload_ms = u64::from(cfg.reload_minutes) * 60_000;
    format!(
        r#"<!DOCTYPE html>
<html lang="hr">
<head>
    <meta charset="UTF-8">
    <meta name="robots" content="noindex, nofollow">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Index Sport Radar</title>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@800;900&family=JetBrains+Mono:wght@700&display=swap" rel="stylesheet">
    <style>
        body, html {{ margin: 0; padding: 0; width: 100%; height: 100%; background: black; color: white; font-family: 'Inter', sans-serif; overflow: hidden; }}
        .header-info {{ position: fixed; top: 15px; right: 20px; z-index: 100; background: rgba(0, 180, 216, 0.9); padding: 5px 15px; border-radius: 8px; font-family: 'JetBrains Mono'; font-size: 1.2rem; font-weight: 800; }}
        .slide {{ position: absolute; width: 100%; height: 100%; display: none; flex-direction: column; }}
        .slide.active {{ display: flex; animation: fadeIn 0.8s ease-in; }}
        .image-container {{ width: 100%; height: 55vh; position: relative; overflow: hidden; background: #111; }}
        .image-container img {{ width: 100%; height: 100%; object-fit: cover; border-bottom: 6px solid #00b4d8; }}
        .content-box {{ flex: 1; padding: 25px 60px; background: #000; display: flex; flex-direction: column; }}
        .meta-line {{ display: flex; gap: 30px; align-items: center; margin-bottom: 20px; }}
        .source {{ color: #00b4d8; font-weight: 900; font-size: 2.5rem; letter-spacing: 2px; }}
        .pub-time {{ font-family: 'JetBrains Mono'; font-size: 2.5rem; opacity: 0.8; }}
        .title {{ font-size: 4rem; font-weight: 900; line-height: 1.1; text-transform: uppercase; }}
        @keyframes fadeIn {{ from {{ opacity: 0; }} to {{ opacity: 1; }} }}
    </style>
</head>
<body>
    <div class="header-info">UPDATED: {stamp}</div>
    {slides}
    <script>
        let current = 0;
        const slides = document.querySelectorAll('.slide');
        function next() {{
            if (slides.length < 2) return;
            slides[current].classList.remove('active');
            current = (current + 1) % slides.length;
            slides[current].classList.add('active');
        }}
        setInterval(next, {rotation_ms});
        setTimeout(() => location.reload(), {reload_ms});
    </script>
</body>
</html>"#
    )
}
