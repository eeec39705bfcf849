//! Tavily Search API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{SearchDepth, SearchError, SearchProvider, SearchRequest, SearchResult};
use crate::config::SearchConfig;

/// Tavily检索客户端
#[derive(Clone)]
pub struct TavilyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct TavilySearchBody<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'static str,
}

#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

impl TavilyClient {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }

    fn depth_param(depth: SearchDepth) -> &'static str {
        match depth {
            SearchDepth::Standard => "basic",
            SearchDepth::Advanced => "advanced",
        }
    }

    /// 解析Tavily的响应体，缺失的字段按空字符串处理
    fn parse_response(body: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        let response: TavilySearchResponse =
            serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(response
            .results
            .into_iter()
            .take(max_results)
            .map(|item| SearchResult::new(item.content, item.url))
            .collect())
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        if self.api_key.trim().is_empty() {
            return Err(SearchError::MissingApiKey);
        }

        let body = TavilySearchBody {
            query: &request.query,
            max_results: request.max_results,
            search_depth: Self::depth_param(request.depth),
        };

        debug!(query = %request.query, depth = %request.depth, "sending Tavily search");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Tavily search failed");
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Self::parse_response(&text, request.max_results)
    }

    fn provider_name(&self) -> &str {
        "tavily"
    }
}
