use crate::cache::DescriptionCache;
use crate::sources::SourceRegistry;
use crate::status::StatusWorkflow;
use crate::traits::NewsBackend;
use crate::types::{
    EntryStatus, FeedEntry, FetchRequest, FilterCriteria, PersistedEntry, PersistedQuery, Result,
    SortDirection,
};
use crate::{filter, sort};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Accepted/rejected/pending counts over a set of persisted entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub pending: usize,
}

/// Composes the engines into one state object the presentation layer holds
/// by handle. Fetching replaces the entry snapshot wholesale. Viewing is
/// filter-then-sort over that snapshot. Curation actions go through the
/// status workflow and never mutate the snapshot.
pub struct CurationPipeline {
    backend: Arc<dyn NewsBackend>,
    sources: SourceRegistry,
    cache: DescriptionCache,
    workflow: StatusWorkflow,
    entries: RwLock<Vec<FeedEntry>>,
    criteria: RwLock<FilterCriteria>,
    direction: RwLock<SortDirection>,
}

impl CurationPipeline {
    pub fn new(backend: Arc<dyn NewsBackend>, criteria: FilterCriteria) -> Self {
        Self {
            sources: SourceRegistry::new(backend.clone()),
            cache: DescriptionCache::new(backend.clone()),
            workflow: StatusWorkflow::new(backend.clone()),
            backend,
            entries: RwLock::new(Vec::new()),
            criteria: RwLock::new(criteria),
            direction: RwLock::new(SortDirection::Ascending),
        }
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    /// Populate the source registry. On failure the registry stays empty
    /// and source filtering degrades to "all sources".
    pub async fn load_sources(&self) -> Result<()> {
        self.sources.load().await
    }

    pub async fn criteria(&self) -> FilterCriteria {
        self.criteria.read().await.clone()
    }

    pub async fn set_criteria(&self, criteria: FilterCriteria) {
        *self.criteria.write().await = criteria;
    }

    pub async fn set_sort(&self, direction: SortDirection) {
        *self.direction.write().await = direction;
    }

    /// Fetch entries for the current criteria's date window and keyword,
    /// replacing the working snapshot wholesale. The previous snapshot
    /// stays visible until the new one has fully arrived; on error it is
    /// left untouched. Zero entries is a valid outcome, not an error.
    pub async fn fetch(&self) -> Result<usize> {
        let request = FetchRequest::from(&*self.criteria.read().await);
        let fresh = self.backend.fetch_feeds(&request).await?;
        let count = fresh.len();

        *self.entries.write().await = fresh;
        info!("Snapshot replaced with {} entries", count);
        Ok(count)
    }

    /// The display-ready sequence: every filter clause applied to the
    /// snapshot first, then the title sort. Never the other way around.
    pub async fn display_entries(&self) -> Vec<FeedEntry> {
        let entries = self.entries.read().await;
        let criteria = self.criteria.read().await;
        let direction = *self.direction.read().await;

        sort::sort_by_title(filter::apply(entries.as_slice(), &criteria), direction)
    }

    /// Number of entries in the current snapshot, before filtering.
    pub async fn snapshot_len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn accept(&self, entry: &FeedEntry) -> Result<()> {
        self.workflow.set_status(entry, EntryStatus::Accepted).await
    }

    pub async fn reject(&self, entry: &FeedEntry) -> Result<()> {
        self.workflow.set_status(entry, EntryStatus::Rejected).await
    }

    /// Resolve the description for a snapshot entry, falling back to the
    /// entry's own feed description when extraction fails.
    pub async fn description(&self, link: &str) -> String {
        let fallback = {
            let entries = self.entries.read().await;
            entries
                .iter()
                .find(|entry| entry.link == link)
                .map(|entry| entry.description.clone())
                .unwrap_or_default()
        };

        self.cache.get(link, &fallback).await
    }

    /// Query the persisted store. Status on the returned entries always
    /// reflects server state; nothing is reconciled locally.
    pub async fn persisted(&self, query: &PersistedQuery) -> Result<Vec<PersistedEntry>> {
        self.backend.filtered_news(query).await
    }

    /// Tally decisions over persisted entries; anything that is neither
    /// accepted nor rejected counts as pending.
    pub fn status_summary(entries: &[PersistedEntry]) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for entry in entries {
            match entry.status {
                EntryStatus::Accepted => summary.accepted += 1,
                EntryStatus::Rejected => summary.rejected += 1,
                EntryStatus::Pending => summary.pending += 1,
            }
        }
        summary
    }
}
