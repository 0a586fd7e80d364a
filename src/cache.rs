use crate::traits::NewsBackend;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

/// One slot per link. `InFlight` holds the channel the first caller created;
/// later callers subscribe to it instead of issuing their own extraction.
enum Slot {
    Ready(String),
    InFlight(broadcast::Sender<Option<String>>),
}

/// Per-session memoization of extracted article descriptions, keyed by link.
///
/// Concurrent lookups for the same link coalesce onto a single backend call:
/// the first caller fetches, everyone else joins the in-flight request and
/// resolves with the same value. A value, once cached, is served for the
/// rest of the session without touching the network. A failed extraction is
/// never cached, so a later call can retry; the affected callers each
/// resolve with their own fallback.
pub struct DescriptionCache {
    backend: Arc<dyn NewsBackend>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl DescriptionCache {
    pub fn new(backend: Arc<dyn NewsBackend>) -> Self {
        Self {
            backend,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the description for `link`, returning `fallback` if the
    /// extraction fails.
    pub async fn get(&self, link: &str, fallback: &str) -> String {
        enum Role {
            Leader(broadcast::Sender<Option<String>>),
            Follower(broadcast::Receiver<Option<String>>),
        }

        let role = {
            let mut slots = self.slots.lock().await;
            match slots.get(link) {
                Some(Slot::Ready(description)) => {
                    debug!("Description cache hit for {}", link);
                    return description.clone();
                }
                Some(Slot::InFlight(sender)) => {
                    debug!("Joining in-flight extraction for {}", link);
                    Role::Follower(sender.subscribe())
                }
                None => {
                    // Only one message ever goes over this channel, and every
                    // subscriber attaches under the lock before it is sent.
                    let (sender, _) = broadcast::channel(1);
                    slots.insert(link.to_string(), Slot::InFlight(sender.clone()));
                    Role::Leader(sender)
                }
            }
        };

        match role {
            Role::Follower(mut receiver) => match receiver.recv().await {
                Ok(Some(description)) => description,
                _ => fallback.to_string(),
            },
            Role::Leader(sender) => {
                let result = self.backend.extract_description(link).await;
                let mut slots = self.slots.lock().await;
                match result {
                    Ok(description) => {
                        slots.insert(link.to_string(), Slot::Ready(description.clone()));
                        let _ = sender.send(Some(description.clone()));
                        description
                    }
                    Err(e) => {
                        warn!("Description extraction failed for {}: {}", link, e);
                        slots.remove(link);
                        let _ = sender.send(None);
                        fallback.to_string()
                    }
                }
            }
        }
    }

    /// Whether `link` has a resolved description cached.
    pub async fn is_ready(&self, link: &str) -> bool {
        matches!(self.slots.lock().await.get(link), Some(Slot::Ready(_)))
    }
}
