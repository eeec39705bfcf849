//! 主题调研：把类型化的参数拼成检索语句，调用联网搜索，并整理成调研文档。
//!
//! 所有调研函数都不会向调用方返回错误：检索失败时，文档正文就是可读的错误信息。

use tracing::{debug, warn};

use crate::search::{SearchDepth, SearchProvider, SearchRequest, SearchResult};

/// 单次调研最多使用的检索结果数
pub const MAX_RESEARCH_RESULTS: usize = 5;

/// 面试题调研的默认级别
pub const DEFAULT_LEVEL: &str = "mid";

/// 调研文档，只会被提示词组装消费一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchDocument(String);

impl ResearchDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl std::fmt::Display for ResearchDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 调研主题
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchTopic {
    Company,
    Interview,
    Salary,
    Resume,
    Trends,
}

impl ResearchTopic {
    /// 文档中每条结果的编号标签
    pub fn block_label(&self) -> &'static str {
        match self {
            ResearchTopic::Company | ResearchTopic::Salary => "Source",
            ResearchTopic::Interview => "Resource",
            ResearchTopic::Resume => "Tip",
            ResearchTopic::Trends => "Insight",
        }
    }

    /// 是否在每条结果后附带来源URL
    pub fn includes_url(&self) -> bool {
        matches!(
            self,
            ResearchTopic::Company | ResearchTopic::Salary | ResearchTopic::Trends
        )
    }

    pub fn depth(&self) -> SearchDepth {
        match self {
            ResearchTopic::Company | ResearchTopic::Trends => SearchDepth::Advanced,
            _ => SearchDepth::Standard,
        }
    }

    fn error_prefix(&self) -> &'static str {
        match self {
            ResearchTopic::Company => "Error searching company info",
            ResearchTopic::Interview => "Error getting interview questions",
            ResearchTopic::Salary => "Error researching salary",
            ResearchTopic::Resume => "Error getting resume tips",
            ResearchTopic::Trends => "Error getting industry trends",
        }
    }
}

/// 一次调研所需的全部参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchRequest {
    Company { company_name: String },
    Interview { role: String, level: String },
    Salary { role: String, location: String },
    Resume { role: String, experience: String },
    Trends { industry: String },
}

impl ResearchRequest {
    pub fn topic(&self) -> ResearchTopic {
        match self {
            ResearchRequest::Company { .. } => ResearchTopic::Company,
            ResearchRequest::Interview { .. } => ResearchTopic::Interview,
            ResearchRequest::Salary { .. } => ResearchTopic::Salary,
            ResearchRequest::Resume { .. } => ResearchTopic::Resume,
            ResearchRequest::Trends { .. } => ResearchTopic::Trends,
        }
    }

    /// 检索语句
    pub fn query(&self) -> String {
        match self {
            ResearchRequest::Company { company_name } => format!(
                "{} company news funding culture recent updates 2024 2025",
                company_name
            ),
            ResearchRequest::Interview { role, level } => format!(
                "{} {} level interview questions answers 2024 2025",
                role, level
            ),
            ResearchRequest::Salary { role, location } => format!(
                "{} salary {} 2024 2025 compensation range total comp",
                role, location
            ),
            ResearchRequest::Resume { role, experience } => format!(
                "{} resume tips best practices {} 2024 ATS",
                role, experience
            ),
            ResearchRequest::Trends { industry } => format!(
                "{} industry trends 2024 2025 hot skills in-demand jobs",
                industry
            ),
        }
    }

    /// 文档标题
    pub fn header(&self) -> String {
        match self {
            ResearchRequest::Company { company_name } => {
                format!("# Company Research: {}", company_name)
            }
            ResearchRequest::Interview { role, level } => {
                format!("# Interview Questions for {} ({} level)", role, level)
            }
            ResearchRequest::Salary { role, location } => {
                format!("# Salary Research: {} in {}", role, location)
            }
            ResearchRequest::Resume { role, .. } => format!("# Resume Tips for {}", role),
            ResearchRequest::Trends { industry } => format!("# Industry Trends: {}", industry),
        }
    }
}

/// 把检索结果整理成调研文档
pub fn format_document(
    topic: ResearchTopic,
    header: &str,
    results: &[SearchResult],
) -> ResearchDocument {
    let mut content = format!("{}\n\n", header);
    for (idx, item) in results.iter().take(MAX_RESEARCH_RESULTS).enumerate() {
        content.push_str(&format!(
            "**{} {}:** {}\n",
            topic.block_label(),
            idx + 1,
            item.content
        ));
        if topic.includes_url() {
            content.push_str(&format!("URL: {}\n\n", item.url));
        } else {
            content.push('\n');
        }
    }
    ResearchDocument(content)
}

/// 主题调研员
pub struct Researcher {
    provider: Box<dyn SearchProvider>,
    max_results: usize,
}

impl Researcher {
    pub fn new(provider: Box<dyn SearchProvider>) -> Self {
        Self {
            provider,
            max_results: MAX_RESEARCH_RESULTS,
        }
    }

    /// 指定单次检索的结果数，上限为 [`MAX_RESEARCH_RESULTS`]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.clamp(1, MAX_RESEARCH_RESULTS);
        self
    }

    /// 公司近况：新闻、融资、文化
    pub async fn company_info(&self, company_name: &str) -> ResearchDocument {
        self.run(&ResearchRequest::Company {
            company_name: company_name.to_string(),
        })
        .await
    }

    /// 岗位面试题
    pub async fn interview_questions(&self, role: &str, level: &str) -> ResearchDocument {
        self.run(&ResearchRequest::Interview {
            role: role.to_string(),
            level: level.to_string(),
        })
        .await
    }

    /// 薪资区间
    pub async fn salary(&self, role: &str, location: &str) -> ResearchDocument {
        self.run(&ResearchRequest::Salary {
            role: role.to_string(),
            location: location.to_string(),
        })
        .await
    }

    /// 简历建议
    pub async fn resume_tips(&self, role: &str, experience: &str) -> ResearchDocument {
        self.run(&ResearchRequest::Resume {
            role: role.to_string(),
            experience: experience.to_string(),
        })
        .await
    }

    /// 行业趋势
    pub async fn industry_trends(&self, industry: &str) -> ResearchDocument {
        self.run(&ResearchRequest::Trends {
            industry: industry.to_string(),
        })
        .await
    }

    /// 执行一次调研，检索失败时返回内嵌错误信息的文档
    pub async fn run(&self, request: &ResearchRequest) -> ResearchDocument {
        let topic = request.topic();
        let search_request = SearchRequest::new(request.query(), self.max_results, topic.depth());

        debug!(
            provider = self.provider.provider_name(),
            query = %search_request.query,
            "running topic research"
        );

        match self.provider.search(&search_request).await {
            Ok(results) => format_document(topic, &request.header(), &results),
            Err(e) => {
                warn!(?topic, error = %e, "topic research failed");
                ResearchDocument(format!("{}: {}", topic.error_prefix(), e))
            }
        }
    }
}
