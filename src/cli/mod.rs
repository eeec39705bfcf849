use crate::assistant::{ExperienceLevel, QuickAction};
use crate::config::{Config, DEFAULT_CONFIG_FILE, LLMProvider};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Career Assistant - 联网调研驱动的求职助手
#[derive(Parser, Debug)]
#[command(name = "career-assistant")]
#[command(
    about = "AI career assistant that researches companies, salaries, interview questions, resume tips and industry trends on the live web before answering."
)]
#[command(version)]
pub struct Args {
    /// 子命令，缺省时进入交互式聊天
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// LLM Provider (openai, gemini)
    #[arg(long, global = true)]
    pub llm_provider: Option<String>,

    /// 当前Provider使用的模型
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// 当前Provider的API KEY
    #[arg(long, global = true)]
    pub llm_api_key: Option<String>,

    /// Tavily API KEY
    #[arg(long, global = true)]
    pub search_api_key: Option<String>,

    /// 温度参数
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// 单次模型调用的超时时间（秒）
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// 退出时把聊天记录导出到该路径
    #[arg(long, global = true)]
    pub export: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 子命令
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 自由提问
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// 调研一家公司
    Company { name: String },

    /// 获取面试题
    Interview {
        role: String,

        /// 经验级别 (entry, mid, senior)
        #[arg(long, default_value = "mid")]
        level: ExperienceLevel,
    },

    /// 分析职位描述
    JobDescription {
        text: Option<String>,

        /// 从文件读取职位描述
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// 薪资调研
    Salary { role: String, location: String },

    /// 简历建议
    Resume {
        role: String,

        /// 工作年限，如 "3 years"
        #[arg(long, default_value = "")]
        experience: String,
    },

    /// 行业趋势
    Trends { industry: String },

    /// 交互式聊天
    Chat,
}

impl Command {
    /// 转换为一次快捷操作；交互式聊天返回 `None`
    pub fn into_quick_action(self) -> Result<Option<QuickAction>> {
        let action = match self {
            Command::Ask { question } => QuickAction::Custom {
                question: question.join(" "),
            },
            Command::Company { name } => QuickAction::Company { company_name: name },
            Command::Interview { role, level } => QuickAction::Interview { role, level },
            Command::JobDescription { text, file } => {
                let description = match (text, file) {
                    (Some(text), _) => text,
                    (None, Some(path)) => std::fs::read_to_string(&path)
                        .context(format!("Failed to read job description: {:?}", path))?,
                    (None, None) => bail!("job-description needs the text or --file <path>"),
                };
                QuickAction::JobDescription { description }
            }
            Command::Salary { role, location } => QuickAction::Salary { role, location },
            Command::Resume { role, experience } => QuickAction::Resume { role, experience },
            Command::Trends { industry } => QuickAction::Trends { industry },
            Command::Chat => return Ok(None),
        };
        Ok(Some(action))
    }
}

impl Args {
    /// 要执行的子命令，缺省为交互式聊天
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }

    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path)?
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(DEFAULT_CONFIG_FILE);

            if default_config_path.exists() {
                Config::from_file(&default_config_path)?
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider ({})",
                    provider_str, config.llm.provider
                );
            }
        }

        // 模型与KEY作用于最终选定的Provider
        let provider = config.llm.provider;
        if let Some(model) = self.model {
            config.llm.profile_mut(provider).model = model;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.profile_mut(provider).api_key = llm_api_key;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            config.llm.timeout_seconds = timeout_seconds;
        }

        // 联网搜索配置
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }

        // 聊天记录导出
        if let Some(export) = self.export {
            config.transcript.export_path = export;
            config.transcript.export_on_exit = true;
        }

        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }
}

// Include tests
#[cfg(test)]
mod tests;
