//! LLM客户端 - 提供统一的LLM服务接口

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::{LLMConfig, LLMProvider};

mod providers;

pub use providers::{ProviderAgent, ProviderClient};

/// 模型调用失败的原因
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to initialise the {provider} client: {message}")]
    Client {
        provider: LLMProvider,
        message: String,
    },

    #[error("no API key configured for {provider} (set {env})")]
    MissingApiKey {
        provider: LLMProvider,
        env: &'static str,
    },

    #[error("{provider} request failed: {message}")]
    Request {
        provider: LLMProvider,
        message: String,
    },

    #[error("{provider} request timed out after {seconds}s")]
    Timeout { provider: LLMProvider, seconds: u64 },
}

/// 单轮调用能力：一个prompt进，一段文本出
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String, ModelError>;

    fn provider(&self) -> LLMProvider;
}

/// LLM客户端 - 基于rig的OpenAI / Gemini实现
#[derive(Clone)]
pub struct LLMClient {
    provider: LLMProvider,
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(provider: LLMProvider, config: LLMConfig) -> Result<Self, ModelError> {
        let client = ProviderClient::new(provider, &config)?;
        Ok(Self {
            provider,
            config,
            client,
        })
    }

    /// 当前使用的模型名称
    pub fn model(&self) -> &str {
        &self.config.profile(self.provider).model
    }

    fn ensure_api_key(&self) -> Result<(), ModelError> {
        if !self.config.profile(self.provider).api_key.trim().is_empty() {
            return Ok(());
        }
        Err(ModelError::MissingApiKey {
            provider: self.provider,
            env: self.provider.api_key_env(),
        })
    }
}

#[async_trait]
impl ModelClient for LLMClient {
    async fn invoke(&self, prompt: &str) -> Result<String, ModelError> {
        self.ensure_api_key()?;

        let agent = self.client.create_agent(self.model(), &self.config)?;
        let seconds = self.config.timeout_seconds;

        debug!(
            provider = %self.provider,
            model = self.model(),
            prompt_len = prompt.len(),
            "invoking model"
        );

        match tokio::time::timeout(Duration::from_secs(seconds), agent.prompt(prompt)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ModelError::Request {
                provider: self.provider,
                message: e.to_string(),
            }),
            Err(_) => Err(ModelError::Timeout {
                provider: self.provider,
                seconds,
            }),
        }
    }

    fn provider(&self) -> LLMProvider {
        self.provider
    }
}
