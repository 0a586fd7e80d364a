pub mod types;
pub mod traits;
pub mod client;
pub mod sources;
pub mod filter;
pub mod sort;
pub mod cache;
pub mod status;
pub mod pipeline;

pub use types::*;
pub use traits::{NewsBackend, NewsItem};
pub use client::{ClientConfig, HttpBackend};
pub use sources::SourceRegistry;
pub use cache::DescriptionCache;
pub use status::StatusWorkflow;
pub use pipeline::{CurationPipeline, StatusSummary};
