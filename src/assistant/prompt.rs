//! 提示词组装

use super::intent::{Intent, SlotSet};
use crate::research::ResearchDocument;

/// 基于调研资料的提示词模板
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// 开头的角色与任务说明
    pub opening_instruction: String,
    /// 结尾的输出要求
    pub closing_instruction: String,
}

impl PromptTemplate {
    pub fn render(&self, research: &str) -> String {
        format!(
            "{}\n\nResearch Data:\n{}\n\n{}",
            self.opening_instruction, research, self.closing_instruction
        )
    }
}

/// 意图对应的调研提示词模板；没有调研环节的意图返回 `None`
pub fn research_template(intent: Intent, slots: &SlotSet) -> Option<PromptTemplate> {
    let slot = |name: &str| slots.get(name).unwrap_or_default().to_string();

    let (opening, closing) = match intent {
        Intent::Company => (
            format!(
                "You are a career assistant. Based on this research about {}, provide a comprehensive summary including recent news, company culture, and any important updates.",
                slot("company_name")
            ),
            "Provide a well-structured, informative response.",
        ),
        Intent::Salary => (
            format!(
                "You are a career assistant. Based on this salary research data, provide a comprehensive salary analysis for {} in {}.",
                slot("role"),
                slot("location")
            ),
            "Include base salary ranges, total compensation, and benefits information.",
        ),
        Intent::Interview => (
            format!(
                "You are a career assistant. Based on this interview questions research, provide comprehensive interview preparation guidance for {} at {} level.",
                slot("role"),
                slots.get("level").unwrap_or(crate::research::DEFAULT_LEVEL)
            ),
            "Include both technical and behavioral questions with sample answers.",
        ),
        Intent::Resume => (
            format!(
                "You are a career assistant. Based on this resume tips research, provide comprehensive resume guidance for {}.",
                slot("role")
            ),
            "Include formatting advice, key sections, and what recruiters look for.",
        ),
        Intent::Trends => (
            format!(
                "You are a career assistant. Based on this industry trends research, provide comprehensive insights about the {} industry.",
                slot("industry")
            ),
            "Include hot skills, emerging technologies, and job market insights.",
        ),
        Intent::JobDescription | Intent::General => return None,
    };

    Some(PromptTemplate {
        opening_instruction: opening,
        closing_instruction: closing.to_string(),
    })
}

/// 职位描述分析提示词
pub fn job_description_prompt(query: &str) -> String {
    format!(
        r#"You are a career assistant. Analyze this job description and provide:

1. KEY SKILLS REQUIRED (technical and soft skills)
2. MUST-HAVE vs NICE-TO-HAVE qualifications
3. MAIN RESPONSIBILITIES
4. EXPERIENCE LEVEL required
5. RESUME TAILORING SUGGESTIONS

Job Description:
{}

Provide a detailed, structured analysis."#,
        query
    )
}

/// 通用职业建议提示词
pub fn general_prompt(query: &str) -> String {
    format!(
        r#"You are a helpful career assistant specializing in job search, interview prep, resume optimization, and career advice.

User Question: {}

Provide helpful, actionable career advice."#,
        query
    )
}

/// 组装最终提示词
///
/// 调研类意图使用调研文档；职位描述与通用意图直接使用原始提问。
/// 调研类意图缺少调研文档时按通用意图处理。
pub fn assemble(
    intent: Intent,
    slots: &SlotSet,
    research: Option<&ResearchDocument>,
    query: &str,
) -> String {
    match intent {
        Intent::JobDescription => job_description_prompt(query),
        Intent::General => general_prompt(query),
        _ => match (research_template(intent, slots), research) {
            (Some(template), Some(doc)) => template.render(doc.as_str()),
            _ => general_prompt(query),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::intent::classify;
    use crate::research::{ResearchTopic, format_document};
    use crate::search::SearchResult;

    fn company_doc() -> ResearchDocument {
        format_document(
            ResearchTopic::Company,
            "# Company Research: Google",
            &[SearchResult::new("Search giant", "https://example.com")],
        )
    }

    #[test]
    fn test_company_prompt() {
        let (intent, slots) = classify("Tell me about Google");
        let doc = company_doc();

        let prompt = assemble(intent, &slots, Some(&doc), "Tell me about Google");

        assert!(prompt.starts_with(
            "You are a career assistant. Based on this research about Google, provide a comprehensive summary"
        ));
        assert!(prompt.contains(
            "Research Data:\n# Company Research: Google\n\n**Source 1:** Search giant"
        ));
        assert!(prompt.ends_with("Provide a well-structured, informative response."));
    }

    #[test]
    fn test_salary_prompt_sections() {
        let query = "What is the salary for Data Scientist in San Francisco?";
        let (intent, slots) = classify(query);
        let doc = format_document(ResearchTopic::Salary, "# Salary Research", &[]);

        let prompt = assemble(intent, &slots, Some(&doc), query);

        assert!(prompt.contains("salary analysis for Data Scientist in San Francisco."));
        assert!(prompt.contains("base salary ranges, total compensation, and benefits"));
    }

    #[test]
    fn test_interview_prompt_uses_level() {
        let slots = SlotSet {
            role: Some("Engineer".to_string()),
            level: Some("entry".to_string()),
            ..Default::default()
        };
        let doc = format_document(ResearchTopic::Interview, "# Interview", &[]);

        let prompt = assemble(Intent::Interview, &slots, Some(&doc), "");

        assert!(prompt.contains("guidance for Engineer at entry level."));
        assert!(prompt.contains("technical and behavioral questions with sample answers"));
    }

    #[test]
    fn test_resume_and_trends_prompts() {
        let doc = format_document(ResearchTopic::Resume, "# Resume Tips for Nurse", &[]);
        let slots = SlotSet {
            role: Some("Nurse".to_string()),
            ..Default::default()
        };
        let prompt = assemble(Intent::Resume, &slots, Some(&doc), "");
        assert!(prompt.contains("resume guidance for Nurse."));
        assert!(prompt.contains("what recruiters look for"));

        let slots = SlotSet {
            industry: Some("Fintech".to_string()),
            ..Default::default()
        };
        let prompt = assemble(Intent::Trends, &slots, Some(&doc), "");
        assert!(prompt.contains("insights about the Fintech industry."));
        assert!(prompt.contains("hot skills, emerging technologies, and job market insights"));
    }

    #[test]
    fn test_job_description_prompt_has_five_headings() {
        let query = "Analyze this job description: Senior Rust engineer, 5+ years";
        let prompt = assemble(Intent::JobDescription, &SlotSet::default(), None, query);

        for heading in [
            "1. KEY SKILLS REQUIRED",
            "2. MUST-HAVE vs NICE-TO-HAVE",
            "3. MAIN RESPONSIBILITIES",
            "4. EXPERIENCE LEVEL",
            "5. RESUME TAILORING SUGGESTIONS",
        ] {
            assert!(prompt.contains(heading), "missing {}", heading);
        }
        assert!(prompt.contains(&format!("Job Description:\n{}", query)));
    }

    #[test]
    fn test_general_prompt_is_preamble_plus_raw_text() {
        let query = "What makes a good leader?";
        let (intent, slots) = classify(query);

        let prompt = assemble(intent, &slots, None, query);

        assert_eq!(prompt, general_prompt(query));
        assert!(prompt.starts_with("You are a helpful career assistant"));
        assert!(prompt.contains("User Question: What makes a good leader?"));
        assert!(!prompt.contains("Research Data"));
    }

    #[test]
    fn test_research_intent_without_document_uses_general_prompt() {
        let slots = SlotSet {
            company_name: Some("Acme".to_string()),
            ..Default::default()
        };
        let prompt = assemble(Intent::Company, &slots, None, "about Acme");
        assert_eq!(prompt, general_prompt("about Acme"));
    }

    #[test]
    fn test_no_template_for_non_research_intents() {
        assert!(research_template(Intent::General, &SlotSet::default()).is_none());
        assert!(research_template(Intent::JobDescription, &SlotSet::default()).is_none());
    }
}
