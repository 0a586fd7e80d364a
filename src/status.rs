use crate::traits::NewsBackend;
use crate::types::{EntryStatus, FeedEntry, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Drives the Pending -> Accepted/Rejected transition for an entry.
///
/// Every call issues exactly one persistence request carrying the full entry
/// payload; the backend owns upsert and dedup by title + link. No status is
/// cached here: the next read comes from re-querying the persisted store.
/// Calling twice for the same entry issues two independent requests and the
/// store's last-write-wins semantics decide the outcome.
pub struct StatusWorkflow {
    backend: Arc<dyn NewsBackend>,
}

impl StatusWorkflow {
    pub fn new(backend: Arc<dyn NewsBackend>) -> Self {
        Self { backend }
    }

    /// Persist a decision for `entry`. `status` is expected to be
    /// `Accepted` or `Rejected`; `Pending` is the absence of a decision and
    /// is not a transition target.
    pub async fn set_status(&self, entry: &FeedEntry, status: EntryStatus) -> Result<()> {
        info!("Marking '{}' as {}", entry.title, status);
        match self.backend.save_status(entry, status).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Failed to save status for '{}': {}", entry.link, e);
                Err(e)
            }
        }
    }
}
