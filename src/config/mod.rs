use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// OpenAI API KEY 的环境变量名
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Gemini API KEY 的环境变量名
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Tavily API KEY 的环境变量名
pub const TAVILY_API_KEY_ENV: &str = "TAVILY_API_KEY";

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "career.toml";

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "gemini")]
    Gemini,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Gemini => write!(f, "gemini"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "gemini" => Ok(LLMProvider::Gemini),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl LLMProvider {
    /// 聊天记录中展示的模型名称
    pub fn label(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "OpenAI",
            LLMProvider::Gemini => "Gemini",
        }
    }

    /// API KEY 对应的环境变量名
    pub fn api_key_env(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => OPENAI_API_KEY_ENV,
            LLMProvider::Gemini => GEMINI_API_KEY_ENV,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "gpt-4o-mini",
            LLMProvider::Gemini => "gemini-2.0-flash-exp",
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// LLM模型配置
    pub llm: LLMConfig,

    /// 联网搜索配置
    pub search: SearchConfig,

    /// 聊天记录配置
    pub transcript: TranscriptConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// 单个Provider的接入信息
///
/// 配置文件中可以只写部分字段，缺省的KEY与模型在加载后按Provider补齐。
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ProviderProfile {
    /// API KEY，构造客户端时读取，不做提前校验
    pub api_key: String,

    /// API基地址，仅对OpenAI兼容接口生效
    pub api_base_url: Option<String>,

    /// 模型名称
    pub model: String,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// 当前选择的Provider
    pub provider: LLMProvider,

    pub openai: ProviderProfile,

    pub gemini: ProviderProfile,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 单次调用超时时间（秒）
    pub timeout_seconds: u64,
}

impl ProviderProfile {
    /// 指定Provider的默认接入信息，KEY取自环境变量
    pub fn for_provider(provider: LLMProvider) -> Self {
        Self {
            api_key: std::env::var(provider.api_key_env()).unwrap_or_default(),
            api_base_url: None,
            model: provider.default_model().to_string(),
        }
    }

    /// 补齐空缺的KEY与模型
    fn fill_missing(&mut self, provider: LLMProvider) {
        if self.api_key.trim().is_empty() {
            self.api_key = std::env::var(provider.api_key_env()).unwrap_or_default();
        }
        if self.model.trim().is_empty() {
            self.model = provider.default_model().to_string();
        }
    }
}

impl LLMConfig {
    /// 获取指定Provider的接入信息
    pub fn profile(&self, provider: LLMProvider) -> &ProviderProfile {
        match provider {
            LLMProvider::OpenAI => &self.openai,
            LLMProvider::Gemini => &self.gemini,
        }
    }

    pub fn profile_mut(&mut self, provider: LLMProvider) -> &mut ProviderProfile {
        match provider {
            LLMProvider::OpenAI => &mut self.openai,
            LLMProvider::Gemini => &mut self.gemini,
        }
    }
}

/// 联网搜索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Tavily API KEY
    pub api_key: String,

    /// Tavily API基地址
    pub api_base_url: String,

    /// 每次检索返回的最大结果数
    pub max_results: usize,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 聊天记录配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct TranscriptConfig {
    /// 导出聊天记录的默认路径
    pub export_path: PathBuf,

    /// 退出时是否自动导出聊天记录
    pub export_on_exit: bool,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let mut config: Config =
            toml::from_str(&content).context("Failed to parse config file")?;
        config.llm.openai.fill_missing(LLMProvider::OpenAI);
        config.llm.gemini.fill_missing(LLMProvider::Gemini);
        Ok(config)
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            openai: ProviderProfile::for_provider(LLMProvider::OpenAI),
            gemini: ProviderProfile::for_provider(LLMProvider::Gemini),
            max_tokens: 4096,
            temperature: 0.7,
            timeout_seconds: 120,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var(TAVILY_API_KEY_ENV).unwrap_or_default(),
            api_base_url: String::from("https://api.tavily.com"),
            max_results: 5,
            timeout_seconds: 30,
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from("career_assistant_log.txt"),
            export_on_exit: false,
        }
    }
}
