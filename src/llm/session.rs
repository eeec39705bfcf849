//! 模型会话：懒加载的模型客户端，切换Provider时失效重建

use tracing::info;

use crate::config::{LLMConfig, LLMProvider};
use crate::llm::client::{LLMClient, ModelClient, ModelError};

/// 按Provider构造模型客户端
pub trait ModelClientFactory: Send + Sync {
    fn create(&self, provider: LLMProvider) -> Result<Box<dyn ModelClient>, ModelError>;
}

/// 基于配置构造 [`LLMClient`]
pub struct LLMClientFactory {
    config: LLMConfig,
}

impl LLMClientFactory {
    pub fn new(config: LLMConfig) -> Self {
        Self { config }
    }
}

impl ModelClientFactory for LLMClientFactory {
    fn create(&self, provider: LLMProvider) -> Result<Box<dyn ModelClient>, ModelError> {
        Ok(Box::new(LLMClient::new(provider, self.config.clone())?))
    }
}

/// 至多持有一个与当前Provider对应的活跃客户端
pub struct ModelSession {
    factory: Box<dyn ModelClientFactory>,
    provider: LLMProvider,
    client: Option<Box<dyn ModelClient>>,
}

impl ModelSession {
    pub fn new(factory: Box<dyn ModelClientFactory>, provider: LLMProvider) -> Self {
        Self {
            factory,
            provider,
            client: None,
        }
    }

    pub fn provider(&self) -> LLMProvider {
        self.provider
    }

    /// 是否已经构造过客户端
    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    /// 切换Provider；与当前不同时丢弃已有客户端，返回是否发生了切换
    pub fn select_provider(&mut self, provider: LLMProvider) -> bool {
        if provider == self.provider {
            return false;
        }
        info!(from = %self.provider, to = %provider, "switching model provider");
        self.provider = provider;
        self.client = None;
        true
    }

    /// 获取客户端，首次使用时构造
    pub fn client(&mut self) -> Result<&dyn ModelClient, ModelError> {
        let client = match self.client.take() {
            Some(client) => client,
            None => {
                info!(provider = %self.provider, "initialising model client");
                self.factory.create(self.provider)?
            }
        };
        Ok(&**self.client.insert(client))
    }
}
