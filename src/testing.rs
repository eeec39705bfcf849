//! 用于测试的内存实现：搜索Provider与模型客户端，不发起任何网络请求。

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::LLMProvider;
use crate::llm::client::{ModelClient, ModelError};
use crate::llm::session::ModelClientFactory;
use crate::search::{SearchError, SearchProvider, SearchRequest, SearchResult};

/// 返回固定结果（或固定错误）并记录所有请求的搜索Provider
#[derive(Clone, Default)]
pub struct MockSearchProvider {
    results: Vec<SearchResult>,
    failure: Option<String>,
    requests: Arc<Mutex<Vec<SearchRequest>>>,
}

impl MockSearchProvider {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    /// 每次检索都以 HTTP 503 失败
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// 目前为止收到的请求
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match &self.failure {
            Some(message) => Err(SearchError::Status {
                status: 503,
                body: message.clone(),
            }),
            None => Ok(self
                .results
                .iter()
                .take(request.max_results)
                .cloned()
                .collect()),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// 模拟模型的回复方式
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Fail(String),
}

/// 记录prompt的模型客户端
pub struct MockModelClient {
    provider: LLMProvider,
    reply: MockReply,
    prompts: Arc<Mutex<Vec<(LLMProvider, String)>>>,
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn invoke(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((self.provider, prompt.to_string()));

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail(message) => Err(ModelError::Request {
                provider: self.provider,
                message: message.clone(),
            }),
        }
    }

    fn provider(&self) -> LLMProvider {
        self.provider
    }
}

/// 统计构造次数的客户端工厂，clone之间共享计数与prompt记录
#[derive(Clone)]
pub struct MockModelFactory {
    reply: MockReply,
    fail_construction: bool,
    constructions: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<(LLMProvider, String)>>>,
}

impl MockModelFactory {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            fail_construction: false,
            constructions: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 构造客户端时总是失败
    pub fn failing_construction() -> Self {
        Self {
            fail_construction: true,
            ..Self::new(MockReply::Text(String::new()))
        }
    }

    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    /// 所有客户端收到的prompt，按调用顺序
    pub fn prompts(&self) -> Vec<(LLMProvider, String)> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ModelClientFactory for MockModelFactory {
    fn create(&self, provider: LLMProvider) -> Result<Box<dyn ModelClient>, ModelError> {
        if self.fail_construction {
            return Err(ModelError::Client {
                provider,
                message: "mock construction failure".to_string(),
            });
        }
        self.constructions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockModelClient {
            provider,
            reply: self.reply.clone(),
            prompts: Arc::clone(&self.prompts),
        }))
    }
}
