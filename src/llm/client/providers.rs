//! LLM Provider支持模块

use rig::{
    agent::Agent,
    client::CompletionClient,
    completion::{Prompt, PromptError},
    providers::gemini::completion::gemini_api_types::{AdditionalParameters, GenerationConfig},
};
use tracing::warn;

use super::ModelError;
use crate::config::{LLMConfig, LLMProvider};

/// 统一的Provider客户端枚举
#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(rig::providers::openai::Client),
    Gemini(rig::providers::gemini::Client),
}

impl ProviderClient {
    /// 根据配置创建相应的provider客户端，API KEY只在此处读取，不做校验
    pub fn new(provider: LLMProvider, config: &LLMConfig) -> Result<Self, ModelError> {
        let profile = config.profile(provider);
        match provider {
            LLMProvider::OpenAI => {
                let builder = rig::providers::openai::Client::builder(&profile.api_key);
                let client = match profile.api_base_url.as_deref() {
                    Some(base_url) => builder.base_url(base_url).build(),
                    None => builder.build(),
                };
                Ok(ProviderClient::OpenAI(client))
            }
            LLMProvider::Gemini => {
                if profile.api_base_url.is_some() {
                    warn!("api_base_url is ignored for the gemini provider");
                }
                let client = rig::providers::gemini::Client::builder(&profile.api_key)
                    .build()
                    .map_err(|e| ModelError::Client {
                        provider,
                        message: e.to_string(),
                    })?;
                Ok(ProviderClient::Gemini(client))
            }
        }
    }

    /// 创建Agent
    pub fn create_agent(
        &self,
        model: &str,
        config: &LLMConfig,
    ) -> Result<ProviderAgent, ModelError> {
        match self {
            ProviderClient::OpenAI(client) => {
                let agent = client
                    .completion_model(model)
                    .completions_api()
                    .into_agent_builder()
                    .max_tokens(config.max_tokens.into())
                    .temperature(config.temperature)
                    .build();
                Ok(ProviderAgent::OpenAI(agent))
            }
            ProviderClient::Gemini(client) => {
                let gen_cfg = GenerationConfig::default();
                let cfg = AdditionalParameters::default().with_config(gen_cfg);
                let params = serde_json::to_value(cfg).map_err(|e| ModelError::Client {
                    provider: LLMProvider::Gemini,
                    message: e.to_string(),
                })?;

                let agent = client
                    .agent(model)
                    .max_tokens(config.max_tokens.into())
                    .temperature(config.temperature)
                    .additional_params(params)
                    .build();
                Ok(ProviderAgent::Gemini(agent))
            }
        }
    }
}

/// 统一的Agent枚举
pub enum ProviderAgent {
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    Gemini(Agent<rig::providers::gemini::completion::CompletionModel>),
}

impl ProviderAgent {
    /// 执行prompt
    pub async fn prompt(&self, prompt: &str) -> Result<String, PromptError> {
        match self {
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).await,
            ProviderAgent::Gemini(agent) => agent.prompt(prompt).await,
        }
    }
}
