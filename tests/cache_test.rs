mod common;

use common::{init_tracing, MockBackend};
use news_curator::DescriptionCache;
use std::sync::Arc;

const LINK: &str = "https://example.com/article";

#[tokio::test]
async fn concurrent_requests_coalesce_into_one_extraction() {
    init_tracing();

    let backend = Arc::new(MockBackend {
        extract_delay_ms: 50,
        ..MockBackend::default()
    });
    backend.set_extract_response(Some("extracted summary"));

    let cache = DescriptionCache::new(backend.clone());

    let (a, b, c, d, e) = tokio::join!(
        cache.get(LINK, "fallback"),
        cache.get(LINK, "fallback"),
        cache.get(LINK, "fallback"),
        cache.get(LINK, "fallback"),
        cache.get(LINK, "fallback"),
    );

    for result in [&a, &b, &c, &d, &e] {
        assert_eq!(result, "extracted summary");
    }
    assert_eq!(backend.extraction_count(), 1);
}

#[tokio::test]
async fn ready_value_is_served_without_refetching() {
    init_tracing();

    let backend = Arc::new(MockBackend::default());
    backend.set_extract_response(Some("extracted summary"));

    let cache = DescriptionCache::new(backend.clone());

    assert_eq!(cache.get(LINK, "fallback").await, "extracted summary");
    assert!(cache.is_ready(LINK).await);

    assert_eq!(cache.get(LINK, "fallback").await, "extracted summary");
    assert_eq!(backend.extraction_count(), 1);
}

#[tokio::test]
async fn failure_returns_fallback_without_poisoning_the_cache() {
    init_tracing();

    let backend = Arc::new(MockBackend::default());
    backend.set_extract_response(None);

    let cache = DescriptionCache::new(backend.clone());

    assert_eq!(cache.get(LINK, "feed blurb").await, "feed blurb");
    assert!(!cache.is_ready(LINK).await);
    assert_eq!(backend.extraction_count(), 1);

    // The failure was not cached, so the next call retries and succeeds.
    backend.set_extract_response(Some("recovered"));
    assert_eq!(cache.get(LINK, "feed blurb").await, "recovered");
    assert_eq!(backend.extraction_count(), 2);

    assert_eq!(cache.get(LINK, "feed blurb").await, "recovered");
    assert_eq!(backend.extraction_count(), 2);
}

#[tokio::test]
async fn joined_callers_fall_back_individually_on_failure() {
    init_tracing();

    let backend = Arc::new(MockBackend {
        extract_delay_ms: 50,
        ..MockBackend::default()
    });
    backend.set_extract_response(None);

    let cache = DescriptionCache::new(backend.clone());

    let (a, b) = tokio::join!(cache.get(LINK, "first blurb"), cache.get(LINK, "second blurb"));

    assert_eq!(backend.extraction_count(), 1);
    let mut results = vec![a, b];
    results.sort();
    assert_eq!(results, vec!["first blurb", "second blurb"]);
}

#[tokio::test]
async fn distinct_links_are_fetched_independently() {
    init_tracing();

    let backend = Arc::new(MockBackend::default());
    backend.set_extract_response(Some("extracted summary"));

    let cache = DescriptionCache::new(backend.clone());

    cache.get("https://example.com/one", "fallback").await;
    cache.get("https://example.com/two", "fallback").await;

    assert_eq!(backend.extraction_count(), 2);
}
