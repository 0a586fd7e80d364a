use crate::types::{
    EntryStatus, FeedEntry, FetchRequest, PersistedEntry, PersistedQuery, Result, SourceInfo,
};
use async_trait::async_trait;
use std::collections::HashMap;

/// The backend service this crate talks to: feed aggregation, article
/// description extraction, and the persisted-decision store.
///
/// The core never fetches or parses feeds itself and never touches storage;
/// everything outward goes through this trait. The HTTP implementation lives
/// in [`crate::client::HttpBackend`]; tests substitute their own.
#[async_trait]
pub trait NewsBackend: Send + Sync {
    /// List the feed sources the backend knows, keyed by source id.
    async fn list_sources(&self) -> Result<HashMap<String, SourceInfo>>;

    /// Fetch feed entries for a date window and optional keyword.
    async fn fetch_feeds(&self, request: &FetchRequest) -> Result<Vec<FeedEntry>>;

    /// Extract a description for the article behind `url`.
    async fn extract_description(&self, url: &str) -> Result<String>;

    /// Persist a curation decision for `entry`. The backend upserts by
    /// title + link; this side never pre-checks for an existing record.
    async fn save_status(&self, entry: &FeedEntry, status: EntryStatus) -> Result<()>;

    /// Query previously persisted entries.
    async fn filtered_news(&self, query: &PersistedQuery) -> Result<Vec<PersistedEntry>>;
}

/// Uniform read-only view over fresh and persisted entries, so the filter
/// and sort engines work on either.
pub trait NewsItem {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn link(&self) -> &str;
    fn published_date(&self) -> &str;
    fn source(&self) -> &str;

    /// Fresh feed entries have no status and report `None`.
    fn status(&self) -> Option<EntryStatus> {
        None
    }
}

impl NewsItem for FeedEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn link(&self) -> &str {
        &self.link
    }

    fn published_date(&self) -> &str {
        &self.published_date
    }

    fn source(&self) -> &str {
        &self.source
    }
}

impl NewsItem for PersistedEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn link(&self) -> &str {
        &self.link
    }

    fn published_date(&self) -> &str {
        &self.published_date
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn status(&self) -> Option<EntryStatus> {
        Some(self.status)
    }
}
