use crate::traits::NewsBackend;
use crate::types::{
    CuratorError, EntryStatus, FeedEntry, FetchRequest, PersistedEntry, PersistedQuery, Result,
    SourceInfo,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Connection settings for the backend service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            user_agent: "news-curator/0.1".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// HTTP implementation of [`NewsBackend`] over the backend's JSON API.
///
/// One call per operation, no automatic retry: a failed call surfaces as an
/// error and the user re-triggers the action.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self> {
        // A trailing slash keeps Url::join from clobbering any path prefix.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(Into::into)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        Self::decode(url, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T> {
        debug!("POST {}", url);
        let response = self.client.post(url.clone()).json(body).send().await?;
        Self::decode(url, response).await
    }

    async fn decode<T: DeserializeOwned>(url: Url, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            warn!("Request to {} failed with HTTP {}", url, status);
            return Err(CuratorError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct SourcesResponse {
    sources: HashMap<String, (String, String)>,
}

#[derive(Debug, Deserialize)]
struct FeedEntriesResponse {
    entries: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
struct PersistedEntriesResponse {
    entries: Vec<PersistedEntry>,
}

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    description: String,
}

#[derive(Debug, Serialize)]
struct SaveStatusRequest<'a> {
    entry: &'a FeedEntry,
    status: EntryStatus,
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    #[serde(default)]
    message: String,
}

#[async_trait]
impl NewsBackend for HttpBackend {
    async fn list_sources(&self) -> Result<HashMap<String, SourceInfo>> {
        let url = self.endpoint("api/rss-sources")?;
        let response: SourcesResponse = self.get_json(url).await?;

        let sources: HashMap<String, SourceInfo> = response
            .sources
            .into_iter()
            .map(|(key, pair)| (key, pair.into()))
            .collect();

        info!("Backend reported {} feed sources", sources.len());
        Ok(sources)
    }

    async fn fetch_feeds(&self, request: &FetchRequest) -> Result<Vec<FeedEntry>> {
        let url = self.endpoint("api/fetch-rss")?;
        let response: FeedEntriesResponse = self.post_json(url, request).await?;

        info!(
            "Fetched {} entries for {}..{}",
            response.entries.len(),
            request.start_date,
            request.end_date
        );
        Ok(response.entries)
    }

    async fn extract_description(&self, article_url: &str) -> Result<String> {
        let url = self.endpoint("api/extract-description")?;
        let request = ExtractRequest { url: article_url };
        let response: ExtractResponse = self.post_json(url, &request).await?;
        Ok(response.description)
    }

    async fn save_status(&self, entry: &FeedEntry, status: EntryStatus) -> Result<()> {
        let url = self.endpoint("api/save-news-status")?;
        let request = SaveStatusRequest { entry, status };
        let ack: AckResponse = self.post_json(url, &request).await?;
        debug!("Save acknowledged: {}", ack.message);
        Ok(())
    }

    async fn filtered_news(&self, query: &PersistedQuery) -> Result<Vec<PersistedEntry>> {
        let mut url = self.endpoint("api/filtered-news")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(status) = query.status_filter {
                pairs.append_pair("status_filter", &status.to_string());
            }
            if let Some(ref start) = query.start_date {
                pairs.append_pair("start_date", start);
            }
            if let Some(ref end) = query.end_date {
                pairs.append_pair("end_date", end);
            }
            if let Some(ref keyword) = query.keyword_filter {
                pairs.append_pair("keyword_filter", keyword);
            }
        }

        let response: PersistedEntriesResponse = self.get_json(url).await?;
        info!("Query returned {} persisted entries", response.entries.len());
        Ok(response.entries)
    }
}
