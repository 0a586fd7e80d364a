use crate::traits::NewsBackend;
use crate::types::{Result, SourceInfo};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Holds the set of feed sources the backend knows about.
///
/// The registry starts empty and is filled by [`SourceRegistry::load`]. When
/// loading fails it stays empty, so source filtering degrades to "all
/// sources" instead of blocking the rest of the flow.
pub struct SourceRegistry {
    backend: Arc<dyn NewsBackend>,
    sources: RwLock<HashMap<String, SourceInfo>>,
}

impl SourceRegistry {
    pub fn new(backend: Arc<dyn NewsBackend>) -> Self {
        Self {
            backend,
            sources: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the registry contents with the backend's current source list.
    pub async fn load(&self) -> Result<()> {
        match self.backend.list_sources().await {
            Ok(sources) => {
                info!("Loaded {} feed sources", sources.len());
                *self.sources.write().await = sources;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load feed sources: {}", e);
                self.sources.write().await.clear();
                Err(e)
            }
        }
    }

    /// Display names of all known sources, sorted for stable presentation.
    /// The "All Sources" sentinel is [`crate::types::SourceFilter::All`],
    /// not a name in this list.
    pub async fn display_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .sources
            .read()
            .await
            .values()
            .map(|source| source.name.clone())
            .collect();
        names.sort();
        names
    }

    pub async fn get(&self, key: &str) -> Option<SourceInfo> {
        self.sources.read().await.get(key).cloned()
    }

    pub async fn is_known(&self, name: &str) -> bool {
        self.sources
            .read()
            .await
            .values()
            .any(|source| source.name == name)
    }

    pub async fn len(&self) -> usize {
        self.sources.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sources.read().await.is_empty()
    }
}
