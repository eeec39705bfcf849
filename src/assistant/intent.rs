//! 基于关键词的意图识别与槽位抽取
//!
//! 规则按固定顺序逐条匹配，先命中者胜出；槽位只取锚点词相邻的一个词。
//! 命中意图但缺少必需槽位时退回 [`Intent::General`]。

/// 槽位两端需要去掉的标点
const TOKEN_PUNCTUATION: &[char] = &['.', ',', '!', '?'];

/// 用户意图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Company,
    Salary,
    Interview,
    Resume,
    Trends,
    JobDescription,
    General,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Intent::Company => "company",
            Intent::Salary => "salary",
            Intent::Interview => "interview",
            Intent::Resume => "resume",
            Intent::Trends => "trends",
            Intent::JobDescription => "job_description",
            Intent::General => "general",
        };
        f.write_str(name)
    }
}

/// 抽取到的槽位，任何一项都可能缺失
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSet {
    pub company_name: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub level: Option<String>,
    pub industry: Option<String>,
    pub experience: Option<String>,
}

impl SlotSet {
    /// 按槽位名读取
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "company_name" => self.company_name.as_deref(),
            "role" => self.role.as_deref(),
            "location" => self.location.as_deref(),
            "level" => self.level.as_deref(),
            "industry" => self.industry.as_deref(),
            "experience" => self.experience.as_deref(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SlotSet::default()
    }
}

/// 识别意图并抽取槽位
pub fn classify(query: &str) -> (Intent, SlotSet) {
    let lower = query.to_lowercase();
    let words: Vec<&str> = query.split_whitespace().collect();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    let matched = if contains_any(&["company", "about", "tell me about"]) {
        company_slots(&words)
    } else if contains_any(&["salary", "compensation"]) {
        salary_slots(query)
    } else if contains_any(&["interview", "questions"]) {
        interview_slots(&lower, &words)
    } else if contains_any(&["resume", "cv"]) {
        resume_slots(&words)
    } else if contains_any(&["trend", "industry"]) {
        trends_slots(&words)
    } else if lower.contains("analyze") && lower.contains("job description") {
        Some((Intent::JobDescription, SlotSet::default()))
    } else {
        None
    };

    matched.unwrap_or((Intent::General, SlotSet::default()))
}

fn company_slots(words: &[&str]) -> Option<(Intent, SlotSet)> {
    let company_name = token_after_first(words, &["about", "company"])?;
    Some((
        Intent::Company,
        SlotSet {
            company_name: Some(company_name),
            ..Default::default()
        },
    ))
}

/// 按字符位置切片：角色取 "for" 之后到 "in" 之前，地点取 "in" 之后到结尾
fn salary_slots(query: &str) -> Option<(Intent, SlotSet)> {
    let chars: Vec<char> = query.chars().collect();
    let lower: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    let for_at = find_chars(&lower, "for");
    let in_at = find_chars(&lower, "in");

    let role = match for_at {
        Some(start) => {
            let end = in_at.unwrap_or(chars.len());
            slice_chars(&chars, start + 4, end).trim().to_string()
        }
        None => String::new(),
    };
    let location = match in_at {
        Some(start) => slice_chars(&chars, start + 3, chars.len())
            .trim_matches(TOKEN_PUNCTUATION)
            .to_string(),
        None => String::new(),
    };

    if role.is_empty() || location.is_empty() {
        return None;
    }
    Some((
        Intent::Salary,
        SlotSet {
            role: Some(role),
            location: Some(location),
            ..Default::default()
        },
    ))
}

fn interview_slots(lower: &str, words: &[&str]) -> Option<(Intent, SlotSet)> {
    let level = if lower.contains("entry") {
        "entry"
    } else if lower.contains("senior") {
        "senior"
    } else {
        "mid"
    };
    let role = token_after_first(words, &["for", "as"])?;
    Some((
        Intent::Interview,
        SlotSet {
            role: Some(role),
            level: Some(level.to_string()),
            ..Default::default()
        },
    ))
}

/// 简历规则扫描全部锚点，最后一次出现的锚点生效
fn resume_slots(words: &[&str]) -> Option<(Intent, SlotSet)> {
    let mut role = None;
    let mut experience = None;
    for (i, word) in words.iter().enumerate() {
        let word = word.to_lowercase();
        if word == "for"
            && let Some(next) = words.get(i + 1)
        {
            role = Some(strip_token(next));
        }
        if (word == "years" || word == "experience") && i > 0 {
            experience = Some(format!("{} years", words[i - 1]));
        }
    }

    let role = role.filter(|r| !r.is_empty())?;
    Some((
        Intent::Resume,
        SlotSet {
            role: Some(role),
            experience,
            ..Default::default()
        },
    ))
}

fn trends_slots(words: &[&str]) -> Option<(Intent, SlotSet)> {
    let industry = token_after_first(words, &["in", "about"])?;
    Some((
        Intent::Trends,
        SlotSet {
            industry: Some(industry),
            ..Default::default()
        },
    ))
}

fn strip_token(token: &str) -> String {
    token.trim_matches(TOKEN_PUNCTUATION).to_string()
}

/// 第一个（不区分大小写）等于锚点词且后面还有词的位置，取其后一个词
fn token_after_first(words: &[&str], anchors: &[&str]) -> Option<String> {
    words
        .iter()
        .enumerate()
        .find(|(i, word)| i + 1 < words.len() && anchors.contains(&word.to_lowercase().as_str()))
        .map(|(i, _)| strip_token(words[i + 1]))
        .filter(|token| !token.is_empty())
}

fn find_chars(haystack: &[char], needle: &str) -> Option<usize> {
    let needle: Vec<char> = needle.chars().collect();
    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
}

/// 越界时截断，起点不小于终点时为空
fn slice_chars(chars: &[char], start: usize, end: usize) -> String {
    let end = end.min(chars.len());
    if start >= end {
        return String::new();
    }
    chars[start..end].iter().collect()
}
