use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A news item freshly fetched from the backend's feed aggregation endpoint.
///
/// The `link` acts as the natural unique key: no two live entries share a
/// link within one fetch result. Entries are immutable once received and are
/// replaced wholesale on the next fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub description: String,
    pub link: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub published_date: String,
    pub source: String,
    #[serde(default)]
    pub image: String,
}

/// A news item previously saved with a curation decision, as returned by the
/// persistence backend. Read-only on this side: `status` always reflects
/// server state at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub published_date: String,
    pub source: String,
    #[serde(default)]
    pub image: String,
    pub status: EntryStatus,
    /// Server-side save time; the store emits a naive UTC timestamp.
    pub saved_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_category: Option<String>,
}

/// Curation decision on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryStatus::Pending => "Pending",
            EntryStatus::Accepted => "Accepted",
            EntryStatus::Rejected => "Rejected",
        };
        f.write_str(name)
    }
}

/// Status clause of a [`FilterCriteria`]. `All` matches every entry,
/// including ones that carry no status at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Accepted,
    Rejected,
}

impl StatusFilter {
    /// Entries without a status (fresh feed entries) always pass.
    pub fn matches(&self, status: Option<EntryStatus>) -> bool {
        match (self, status) {
            (StatusFilter::All, _) => true,
            (_, None) => true,
            (StatusFilter::Accepted, Some(s)) => s == EntryStatus::Accepted,
            (StatusFilter::Rejected, Some(s)) => s == EntryStatus::Rejected,
        }
    }
}

/// Source clause of a [`FilterCriteria`]. `All` is the "All Sources"
/// sentinel and matches every entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceFilter {
    #[default]
    All,
    Named(String),
}

impl SourceFilter {
    pub fn matches(&self, source: &str) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Named(name) => name == source,
        }
    }
}

/// Client-side filter inputs applied to a fetched entry snapshot.
///
/// Both date bounds are inclusive `YYYY-MM-DD` strings; `start_date <=
/// end_date` is the caller's contract, as is ISO normalization of the
/// values. An empty keyword means no keyword constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub start_date: String,
    pub end_date: String,
    pub keyword: String,
    pub status_filter: StatusFilter,
    pub source_filter: SourceFilter,
}

impl FilterCriteria {
    /// Criteria over a date range with every other clause wide open.
    pub fn for_range(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            keyword: String::new(),
            status_filter: StatusFilter::All,
            source_filter: SourceFilter::All,
        }
    }
}

/// Title sort direction for the displayed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A feed source known to the backend: display name plus feed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub name: String,
    pub url: String,
}

impl From<(String, String)> for SourceInfo {
    fn from((name, url): (String, String)) -> Self {
        Self { name, url }
    }
}

/// Body of the feed fetch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchRequest {
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl From<&FilterCriteria> for FetchRequest {
    fn from(criteria: &FilterCriteria) -> Self {
        Self {
            start_date: criteria.start_date.clone(),
            end_date: criteria.end_date.clone(),
            keyword: if criteria.keyword.is_empty() {
                None
            } else {
                Some(criteria.keyword.clone())
            },
        }
    }
}

/// Query parameters for the persisted-entries endpoint. Unset fields are
/// omitted from the request entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistedQuery {
    pub status_filter: Option<EntryStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub keyword_filter: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CuratorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, CuratorError>;
