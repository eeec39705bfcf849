//! 快捷操作：结构化表单与自由提问

use clap::ValueEnum;
use thiserror::Error;

use super::intent::{Intent, SlotSet, classify};

/// 面试题的经验级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 表单输入不合法
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuickActionError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// 用户的一次提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickAction {
    Custom { question: String },
    Company { company_name: String },
    Interview { role: String, level: ExperienceLevel },
    JobDescription { description: String },
    Salary { role: String, location: String },
    Resume { role: String, experience: String },
    Trends { industry: String },
}

impl QuickAction {
    /// 操作名称
    pub fn title(&self) -> &'static str {
        match self {
            QuickAction::Custom { .. } => "Custom Question",
            QuickAction::Company { .. } => "Research a Company",
            QuickAction::Interview { .. } => "Get Interview Questions",
            QuickAction::JobDescription { .. } => "Analyze Job Description",
            QuickAction::Salary { .. } => "Salary Research",
            QuickAction::Resume { .. } => "Resume Tips",
            QuickAction::Trends { .. } => "Industry Trends",
        }
    }

    /// 校验必填项，经验年限可以为空
    pub fn validate(&self) -> Result<(), QuickActionError> {
        let required: &[(&'static str, &str)] = match self {
            QuickAction::Custom { question } => &[("question", question)],
            QuickAction::Company { company_name } => &[("company name", company_name)],
            QuickAction::Interview { role, .. } => &[("role", role)],
            QuickAction::JobDescription { description } => &[("job description", description)],
            QuickAction::Salary { role, location } => &[("role", role), ("location", location)],
            QuickAction::Resume { role, .. } => &[("role", role)],
            QuickAction::Trends { industry } => &[("industry", industry)],
        };

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(QuickActionError::EmptyField(field)),
            None => Ok(()),
        }
    }

    /// 发送给助手的完整提问
    pub fn to_query(&self) -> String {
        match self {
            QuickAction::Custom { question } => question.trim().to_string(),
            QuickAction::Company { company_name } => format!(
                "Tell me about {}. Include recent news, company culture, funding, and any important updates.",
                company_name.trim()
            ),
            QuickAction::Interview { role, level } => format!(
                "Give me interview questions for {} at {} level. Include both technical and behavioral questions with sample answers.",
                role.trim(),
                level
            ),
            QuickAction::JobDescription { description } => format!(
                "Analyze this job description and extract key skills, requirements, responsibilities, and suggest how I should tailor my resume:\n\n{}",
                description.trim()
            ),
            QuickAction::Salary { role, location } => format!(
                "What is the salary range for {} in {}? Include base salary, total compensation, and any benefits information.",
                role.trim(),
                location.trim()
            ),
            QuickAction::Resume { role, experience } => format!(
                "Give me resume tips for {} with {} experience. Include formatting advice, key sections, and what recruiters look for.",
                role.trim(),
                experience.trim()
            ),
            QuickAction::Trends { industry } => format!(
                "What are the latest trends in {}? Include hot skills, emerging technologies, and job market insights.",
                industry.trim()
            ),
        }
    }

    /// 记录到聊天记录中的用户消息，职位描述只记录占位文本
    pub fn display_text(&self) -> String {
        match self {
            QuickAction::JobDescription { .. } => "Analyzing job description...".to_string(),
            _ => self.to_query(),
        }
    }

    /// 处理过程中展示的进度提示
    pub fn progress_message(&self) -> String {
        match self {
            QuickAction::Custom { .. } => "🤖 Thinking...".to_string(),
            QuickAction::Company { company_name } => {
                format!("🔍 Researching {}...", company_name.trim())
            }
            QuickAction::Interview { .. } => "📝 Generating interview questions...".to_string(),
            QuickAction::JobDescription { .. } => "🔍 Analyzing job description...".to_string(),
            QuickAction::Salary { .. } => "💰 Researching salary data...".to_string(),
            QuickAction::Resume { .. } => "📄 Generating resume tips...".to_string(),
            QuickAction::Trends { .. } => "📈 Researching industry trends...".to_string(),
        }
    }

    /// 表单直接映射到对应意图与槽位，自由提问才走关键词识别
    pub fn classification(&self) -> (Intent, SlotSet) {
        match self {
            QuickAction::Custom { question } => classify(question),
            QuickAction::Company { company_name } => (
                Intent::Company,
                SlotSet {
                    company_name: Some(company_name.trim().to_string()),
                    ..Default::default()
                },
            ),
            QuickAction::Interview { role, level } => (
                Intent::Interview,
                SlotSet {
                    role: Some(role.trim().to_string()),
                    level: Some(level.to_string()),
                    ..Default::default()
                },
            ),
            QuickAction::JobDescription { .. } => (Intent::JobDescription, SlotSet::default()),
            QuickAction::Salary { role, location } => (
                Intent::Salary,
                SlotSet {
                    role: Some(role.trim().to_string()),
                    location: Some(location.trim().to_string()),
                    ..Default::default()
                },
            ),
            QuickAction::Resume { role, experience } => (
                Intent::Resume,
                SlotSet {
                    role: Some(role.trim().to_string()),
                    experience: Some(experience.trim().to_string()).filter(|e| !e.is_empty()),
                    ..Default::default()
                },
            ),
            QuickAction::Trends { industry } => (
                Intent::Trends,
                SlotSet {
                    industry: Some(industry.trim().to_string()),
                    ..Default::default()
                },
            ),
        }
    }
}
