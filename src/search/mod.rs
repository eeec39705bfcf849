//! 联网搜索适配层
//!
//! 研究函数只依赖 [`SearchProvider`]，具体的搜索后端（Tavily）在 [`tavily`] 中实现。

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TAVILY_API_KEY_ENV;

pub mod tavily;

pub use tavily::TavilyClient;

/// 检索深度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDepth {
    #[default]
    Standard,
    Advanced,
}

impl std::fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchDepth::Standard => write!(f, "standard"),
            SearchDepth::Advanced => write!(f, "advanced"),
        }
    }
}

/// 一次检索请求
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: usize,
    pub depth: SearchDepth,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, max_results: usize, depth: SearchDepth) -> Self {
        Self {
            query: query.into(),
            max_results,
            depth,
        }
    }
}

/// 单条检索结果，按Provider返回的顺序排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub content: String,
    pub url: String,
}

impl SearchResult {
    pub fn new(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            url: url.into(),
        }
    }
}

/// 检索失败的原因
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search API key is not configured (set {})", TAVILY_API_KEY_ENV)]
    MissingApiKey,

    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode search response: {0}")]
    Decode(String),
}

/// 联网搜索后端的统一抽象
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// 执行检索，返回最多 `request.max_results` 条结果
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError>;

    /// Provider名称，用于日志
    fn provider_name(&self) -> &str;
}
