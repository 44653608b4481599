//! Integration tests driving the real extractor against mock HTTP servers.
//!
//! Each test stands up a `wiremock` server playing the part of Index.hr,
//! points the extractor at it with an injected "now", and checks which
//! strategy won and what the final collection looks like.

use chrono::{DateTime, TimeZone};
use chrono_tz::{Europe::Zagreb, Tz};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use index_sport_radar::config::RadarConfig;
use index_sport_radar::outputs::slideshow::{self, PLACEHOLDER_TITLE};
use index_sport_radar::scrapers::{self, extract_at};
use index_sport_radar::timefmt::UNKNOWN_TIME;

fn test_now() -> DateTime<Tz> {
    Zagreb.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

fn test_config(server: &MockServer) -> RadarConfig {
    RadarConfig {
        listing_url: format!("{}/sport", server.uri()),
        timeout: std::time::Duration::from_secs(2),
        ..RadarConfig::default()
    }
}

async fn mount_listing(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/sport"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

const STRUCTURED_LISTING: &str = r#"<html><head>
<script type="application/ld+json">{
    "@context": "https://schema.org",
    "@type": "ItemList",
    "itemListElement": [
        {"item": {"name": "Older structured story",
                  "image": "https://cdn.index.hr/old.jpg?w=300&h=200",
                  "datePublished": "2024-03-15T09:00:00Z"}},
        {"item": {"name": "Newest structured story",
                  "image": "https://cdn.index.hr/new.jpg",
                  "datePublished": "2024-03-15T10:30:00Z"}}
    ]
}</script>
</head><body>
<div class="grid-item"><img src="/card.jpg"><span class="title">Card that must lose</span></div>
</body></html>"#;

const CARD_LISTING: &str = r#"<html><body>
<div class="first-news-holder">
    <img src="/img/lead.jpg"><span class="title">Lead card</span>
</div>
<div class="grid-item">
    <img src="/img/second.jpg"><span class="title">Second card</span>
</div>
</body></html>"#;

#[tokio::test]
async fn structured_data_wins_over_listing_cards() {
    let server = MockServer::start().await;
    mount_listing(&server, STRUCTURED_LISTING).await;
    let cfg = test_config(&server);
    let client = scrapers::build_client(&cfg).unwrap();

    let items = extract_at(&client, &cfg, &test_now()).await;

    assert_eq!(items.len(), 2);
    // Sorted newest first, not in page order
    assert_eq!(items[0].title, "Newest structured story");
    assert_eq!(items[1].title, "Older structured story");
    // 10:30Z is 11:30 local, 30 minutes before the injected now
    assert_eq!(items[0].display_time, "30 minutes ago");
    // No card title leaked in: the fallback never ran
    assert!(items.iter().all(|i| i.title != "Card that must lose"));
}

#[tokio::test]
async fn image_urls_are_normalized_after_extraction() {
    let server = MockServer::start().await;
    mount_listing(&server, STRUCTURED_LISTING).await;
    let cfg = test_config(&server);
    let client = scrapers::build_client(&cfg).unwrap();

    let items = extract_at(&client, &cfg, &test_now()).await;

    // A query string is replaced by the fixed crop parameters
    assert_eq!(
        items[1].image_url.as_deref(),
        Some("https://cdn.index.hr/old.jpg?width=1200&height=630&mode=crop")
    );
    // No query string passes through unchanged
    assert_eq!(
        items[0].image_url.as_deref(),
        Some("https://cdn.index.hr/new.jpg")
    );
}

#[tokio::test]
async fn listing_cards_are_used_when_structured_data_is_missing() {
    let server = MockServer::start().await;
    mount_listing(&server, CARD_LISTING).await;
    let cfg = test_config(&server);
    let client = scrapers::build_client(&cfg).unwrap();

    let items = extract_at(&client, &cfg, &test_now()).await;

    assert_eq!(items.len(), 2);
    assert!(items.iter().any(|i| i.title == "Lead card"));
    assert!(items.iter().all(|i| i.display_time == UNKNOWN_TIME));
    // Only the listing page itself was fetched
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn deep_fetch_probes_articles_and_degrades_per_item() {
    let server = MockServer::start().await;
    // Cards have titles and links but no images, so the card strategy
    // yields nothing and the chain falls through to deep fetch.
    let listing = format!(
        r#"<html><body>
        <div class="grid-item"><a href="{base}/sport/dated"><span class="title">Dated article</span></a></div>
        <div class="grid-item"><a href="{base}/sport/undatable"><span class="title">Undatable article</span></a></div>
        </body></html>"#,
        base = server.uri()
    );
    mount_listing(&server, &listing).await;
    Mock::given(method("GET"))
        .and(path("/sport/dated"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head>
            <meta property="article:published_time" content="2024-03-15T10:00:00Z">
            </head></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sport/undatable"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let cfg = test_config(&server);
    let client = scrapers::build_client(&cfg).unwrap();
    let items = extract_at(&client, &cfg, &test_now()).await;

    // Both candidates survive; the failed probe degrades to the sentinel
    assert_eq!(items.len(), 2);
    let dated = items.iter().find(|i| i.title == "Dated article").unwrap();
    let undatable = items.iter().find(|i| i.title == "Undatable article").unwrap();
    assert_eq!(dated.display_time, "1 hours ago");
    assert_eq!(undatable.display_time, UNKNOWN_TIME);
    // Dated items sort above undated ones
    assert_eq!(items[0].title, "Dated article");
}

#[tokio::test]
async fn item_cap_limits_deep_fetch_requests() {
    let server = MockServer::start().await;
    let mut cards = String::new();
    for i in 0..20 {
        cards.push_str(&format!(
            r#"<div class="grid-item"><a href="{base}/sport/a{i}"><span class="title">Story {i}</span></a></div>"#,
            base = server.uri()
        ));
    }
    mount_listing(&server, &format!("<html><body>{cards}</body></html>")).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cfg = test_config(&server);
    let client = scrapers::build_client(&cfg).unwrap();
    let items = extract_at(&client, &cfg, &test_now()).await;

    assert_eq!(items.len(), cfg.max_items);
    // One listing fetch plus at most max_items article probes
    assert!(server.received_requests().await.unwrap().len() <= 1 + cfg.max_items);
}

#[tokio::test]
async fn non_200_listing_yields_an_empty_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sport"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let cfg = test_config(&server);
    let client = scrapers::build_client(&cfg).unwrap();
    let items = extract_at(&client, &cfg, &test_now()).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn dead_server_yields_an_empty_collection() {
    let server = MockServer::start().await;
    let cfg = RadarConfig {
        listing_url: format!("{}/sport", server.uri()),
        timeout: std::time::Duration::from_secs(2),
        ..RadarConfig::default()
    };
    drop(server);

    let client = scrapers::build_client(&cfg).unwrap();
    let items = extract_at(&client, &cfg, &test_now()).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn empty_extraction_still_renders_a_placeholder_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sport"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let cfg = test_config(&server);
    let client = scrapers::build_client(&cfg).unwrap();
    let items = extract_at(&client, &cfg, &test_now()).await;
    let requests_after_extract = server.received_requests().await.unwrap().len();

    let html = slideshow::render(&items, &test_now(), &cfg);

    assert!(html.contains(PLACEHOLDER_TITLE));
    assert!(html.contains(UNKNOWN_TIME));
    assert_eq!(html.matches(r#"class="slide active""#).count(), 1);
    // The renderer made no network calls
    assert_eq!(
        server.received_requests().await.unwrap().len(),
        requests_after_extract
    );
}
