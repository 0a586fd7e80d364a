use anyhow::Context;
use chrono::{Duration, Utc};
use clap::{Parser, ValueEnum};
use news_curator::{
    ClientConfig, CurationPipeline, FilterCriteria, HttpBackend, SortDirection, SourceFilter,
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortDirection {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortDirection::Ascending,
            SortArg::Desc => SortDirection::Descending,
        }
    }
}

/// Fetch, filter and curate news entries from the backend service.
#[derive(Debug, Parser)]
#[command(name = "news-curator")]
struct Args {
    /// Base URL of the backend service
    #[arg(long, default_value = "http://localhost:8000")]
    base_url: String,

    /// Inclusive start of the date window (YYYY-MM-DD, default: 7 days ago)
    #[arg(long)]
    start_date: Option<String>,

    /// Inclusive end of the date window (YYYY-MM-DD, default: today)
    #[arg(long)]
    end_date: Option<String>,

    /// Keyword to match against titles and descriptions
    #[arg(long, default_value = "")]
    keyword: String,

    /// Only show entries from this source
    #[arg(long)]
    source: Option<String>,

    /// Title sort direction
    #[arg(long, value_enum, default_value_t = SortArg::Asc)]
    sort: SortArg,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let today = Utc::now().date_naive();
    let start_date = args
        .start_date
        .unwrap_or_else(|| (today - Duration::days(7)).format("%Y-%m-%d").to_string());
    let end_date = args
        .end_date
        .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());

    let mut criteria = FilterCriteria::for_range(start_date, end_date);
    criteria.keyword = args.keyword;
    if let Some(source) = args.source {
        criteria.source_filter = SourceFilter::Named(source);
    }

    let backend = HttpBackend::new(ClientConfig {
        base_url: args.base_url,
        ..ClientConfig::default()
    })
    .context("invalid backend configuration")?;

    let pipeline = CurationPipeline::new(Arc::new(backend), criteria);
    pipeline.set_sort(args.sort.into()).await;

    // A missing source list only degrades the source filter, so keep going.
    if pipeline.load_sources().await.is_err() {
        warn!("Continuing without a source list");
    } else {
        let names = pipeline.sources().display_names().await;
        info!("Known sources: {}", names.join(", "));
    }

    let fetched = pipeline
        .fetch()
        .await
        .context("failed to fetch news entries")?;
    info!("Fetched {} entries", fetched);

    let entries = pipeline.display_entries().await;
    if entries.is_empty() {
        println!("No news entries found for the current filters.");
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{}  [{}]  {}\n    {}",
            entry.published_date, entry.source, entry.title, entry.link
        );
    }
    println!("\n{} entries shown", entries.len());

    Ok(())
}
