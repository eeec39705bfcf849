//! 职业助手：意图识别 -> 主题调研 -> 提示词组装 -> 模型调用 -> 聊天记录

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{Config, LLMProvider};
use crate::llm::client::{ModelClient, ModelError};
use crate::llm::session::{LLMClientFactory, ModelClientFactory, ModelSession};
use crate::research::{DEFAULT_LEVEL, ResearchDocument, ResearchRequest, Researcher};
use crate::search::TavilyClient;
use crate::transcript::{ChatMessage, Transcript};

pub mod intent;
pub mod prompt;
pub mod quick_action;

pub use intent::{Intent, SlotSet, classify};
pub use quick_action::{ExperienceLevel, QuickAction, QuickActionError};

/// 一次提交无法产生回复的原因
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] QuickActionError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// 意图对应的调研参数；没有调研环节或缺少必需槽位时返回 `None`
pub fn research_request(intent: Intent, slots: &SlotSet) -> Option<ResearchRequest> {
    let owned = |name: &str| slots.get(name).map(str::to_string);

    match intent {
        Intent::Company => Some(ResearchRequest::Company {
            company_name: owned("company_name")?,
        }),
        Intent::Salary => Some(ResearchRequest::Salary {
            role: owned("role")?,
            location: owned("location")?,
        }),
        Intent::Interview => Some(ResearchRequest::Interview {
            role: owned("role")?,
            level: owned("level").unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
        }),
        Intent::Resume => Some(ResearchRequest::Resume {
            role: owned("role")?,
            experience: owned("experience").unwrap_or_default(),
        }),
        Intent::Trends => Some(ResearchRequest::Trends {
            industry: owned("industry")?,
        }),
        Intent::JobDescription | Intent::General => None,
    }
}

/// 模型调用失败时回复给用户的文本
pub fn error_reply(error: &ModelError) -> String {
    format!(
        "I encountered an error processing your request: {}\n\nPlease try rephrasing your question or contact support.",
        error
    )
}

/// 对已识别的提问生成回复，模型错误会被转换成回复文本
pub async fn answer(
    intent: Intent,
    slots: &SlotSet,
    query: &str,
    researcher: &Researcher,
    client: &dyn ModelClient,
) -> String {
    let research: Option<ResearchDocument> = match research_request(intent, slots) {
        Some(request) => Some(researcher.run(&request).await),
        None => None,
    };

    let prompt = prompt::assemble(intent, slots, research.as_ref(), query);
    debug!(%intent, prompt_len = prompt.len(), "prompt assembled");

    match client.invoke(&prompt).await {
        Ok(text) => text,
        Err(e) => error_reply(&e),
    }
}

/// 处理一条自由提问
pub async fn process_query(
    query: &str,
    researcher: &Researcher,
    client: &dyn ModelClient,
) -> String {
    let (intent, slots) = classify(query);
    info!(%intent, "query classified");
    answer(intent, &slots, query, researcher, client).await
}

/// 一个用户会话的全部状态
pub struct CareerAssistant {
    id: Uuid,
    researcher: Researcher,
    session: ModelSession,
    transcript: Transcript,
}

impl CareerAssistant {
    pub fn new(
        researcher: Researcher,
        factory: Box<dyn ModelClientFactory>,
        provider: LLMProvider,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            researcher,
            session: ModelSession::new(factory, provider),
            transcript: Transcript::new(),
        }
    }

    /// 基于配置创建：Tavily检索 + rig模型客户端
    pub fn from_config(config: &Config) -> Result<Self> {
        let search = TavilyClient::new(&config.search).context("Failed to create search client")?;
        let researcher =
            Researcher::new(Box::new(search)).with_max_results(config.search.max_results);
        let factory = LLMClientFactory::new(config.llm.clone());

        Ok(Self::new(
            researcher,
            Box::new(factory),
            config.llm.provider,
        ))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn provider(&self) -> LLMProvider {
        self.session.provider()
    }

    /// 切换Provider，下次调用时重新构造客户端
    pub fn select_provider(&mut self, provider: LLMProvider) -> bool {
        self.session.select_provider(provider)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// 清空聊天记录，会话与客户端保持不变
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    pub fn export_chat_log(&self) -> String {
        self.transcript.export_chat_log()
    }

    /// 提交一次快捷操作，返回写入聊天记录的助手消息
    ///
    /// 输入不合法时不记录任何内容；客户端构造失败时只保留用户消息。
    pub async fn submit(&mut self, action: QuickAction) -> Result<&ChatMessage, AssistantError> {
        action.validate()?;

        let query = action.to_query();
        let (intent, slots) = action.classification();
        self.transcript.add_message(ChatMessage::user(action.display_text()));

        let provider = self.session.provider();
        debug!(session = %self.id, %provider, %intent, "handling submission");

        let client = self.session.client()?;
        let reply = answer(intent, &slots, &query, &self.researcher, client).await;

        Ok(self
            .transcript
            .add_message(ChatMessage::assistant(reply, provider.label())))
    }

    /// 自由提问
    pub async fn ask(&mut self, question: &str) -> Result<&ChatMessage, AssistantError> {
        self.submit(QuickAction::Custom {
            question: question.to_string(),
        })
        .await
    }
}
