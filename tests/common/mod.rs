#![allow(dead_code)]

// Mock backend and entry builders shared by the integration tests.

use async_trait::async_trait;
use chrono::Utc;
use news_curator::{
    CuratorError, EntryStatus, FeedEntry, FetchRequest, NewsBackend, PersistedEntry,
    PersistedQuery, Result, SourceInfo,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    });
}

pub fn entry(title: &str, link: &str, published_date: &str, source: &str) -> FeedEntry {
    FeedEntry {
        title: title.to_string(),
        description: String::new(),
        link: link.to_string(),
        published_date: published_date.to_string(),
        source: source.to_string(),
        image: String::new(),
    }
}

pub fn persisted(
    title: &str,
    link: &str,
    published_date: &str,
    source: &str,
    status: EntryStatus,
) -> PersistedEntry {
    PersistedEntry {
        id: format!("id-{}", link),
        title: title.to_string(),
        description: String::new(),
        link: link.to_string(),
        published_date: published_date.to_string(),
        source: source.to_string(),
        image: String::new(),
        status,
        saved_at: Utc::now().naive_utc(),
        predicted_category: None,
    }
}

/// In-memory stand-in for the backend service. Every collaborator call is
/// recorded so tests can assert how often and with what arguments the core
/// reached out.
#[derive(Default)]
pub struct MockBackend {
    pub sources: Mutex<HashMap<String, SourceInfo>>,
    pub fail_sources: AtomicBool,

    pub feed_entries: Mutex<Vec<FeedEntry>>,
    pub fail_fetch: AtomicBool,
    pub fetch_requests: Mutex<Vec<FetchRequest>>,

    pub persisted_entries: Mutex<Vec<PersistedEntry>>,
    pub persisted_queries: Mutex<Vec<PersistedQuery>>,

    /// `None` makes extraction fail; `Some` is the extracted description.
    pub extract_response: Mutex<Option<String>>,
    pub extract_delay_ms: u64,
    pub extraction_calls: AtomicUsize,

    pub saved: Mutex<Vec<(String, EntryStatus)>>,
}

impl MockBackend {
    pub fn with_entries(entries: Vec<FeedEntry>) -> Self {
        let backend = Self::default();
        *backend.feed_entries.lock().unwrap() = entries;
        backend
    }

    pub fn set_entries(&self, entries: Vec<FeedEntry>) {
        *self.feed_entries.lock().unwrap() = entries;
    }

    pub fn set_extract_response(&self, response: Option<&str>) {
        *self.extract_response.lock().unwrap() = response.map(str::to_string);
    }

    pub fn set_sources(&self, sources: &[(&str, &str, &str)]) {
        let map = sources
            .iter()
            .map(|(key, name, url)| {
                (
                    key.to_string(),
                    SourceInfo {
                        name: name.to_string(),
                        url: url.to_string(),
                    },
                )
            })
            .collect();
        *self.sources.lock().unwrap() = map;
    }

    pub fn saved_statuses(&self) -> Vec<(String, EntryStatus)> {
        self.saved.lock().unwrap().clone()
    }

    pub fn extraction_count(&self) -> usize {
        self.extraction_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsBackend for MockBackend {
    async fn list_sources(&self) -> Result<HashMap<String, SourceInfo>> {
        if self.fail_sources.load(Ordering::SeqCst) {
            return Err(CuratorError::General("source list unavailable".to_string()));
        }
        Ok(self.sources.lock().unwrap().clone())
    }

    async fn fetch_feeds(&self, request: &FetchRequest) -> Result<Vec<FeedEntry>> {
        self.fetch_requests.lock().unwrap().push(request.clone());
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(CuratorError::General("fetch failed".to_string()));
        }
        Ok(self.feed_entries.lock().unwrap().clone())
    }

    async fn extract_description(&self, url: &str) -> Result<String> {
        self.extraction_calls.fetch_add(1, Ordering::SeqCst);
        if self.extract_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.extract_delay_ms)).await;
        }
        match self.extract_response.lock().unwrap().clone() {
            Some(description) => Ok(description),
            None => Err(CuratorError::General(format!(
                "extraction failed for {}",
                url
            ))),
        }
    }

    async fn save_status(&self, entry: &FeedEntry, status: EntryStatus) -> Result<()> {
        self.saved.lock().unwrap().push((entry.link.clone(), status));
        Ok(())
    }

    async fn filtered_news(&self, query: &PersistedQuery) -> Result<Vec<PersistedEntry>> {
        self.persisted_queries.lock().unwrap().push(query.clone());
        let entries = self.persisted_entries.lock().unwrap();
        let filtered = entries
            .iter()
            .filter(|entry| match query.status_filter {
                Some(status) => entry.status == status,
                None => true,
            })
            .cloned()
            .collect();
        Ok(filtered)
    }
}
