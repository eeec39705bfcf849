//! 聊天记录：只追加的消息列表，支持清空与导出

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use std::path::Path;

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一条聊天消息，创建后不可修改
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    role: Role,
    text: String,
    model: Option<String>,
    created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            model: None,
            created_at: Utc::now(),
        }
    }

    /// 助手消息必须带上生成它的模型名称
    pub fn assistant(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            model: Some(model.into()),
            created_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 导出格式：`ROLE (model): text`
    pub fn export_line(&self) -> String {
        format!(
            "{} ({}): {}",
            self.role.as_str().to_uppercase(),
            self.model.as_deref().unwrap_or(""),
            self.text
        )
    }

    /// 终端展示格式，助手消息后附 `*(model)*`
    pub fn render(&self) -> String {
        match (&self.role, &self.model) {
            (Role::Assistant, Some(model)) => format!("{} *({})*", self.text, model),
            _ => self.text.clone(),
        }
    }

    /// 历史记录中的一行：`[HH:MM:SS] You: text`，时间为本地时区
    pub fn history_line(&self) -> String {
        let speaker = match self.role {
            Role::User => "You",
            Role::Assistant => "Assistant",
        };
        format!(
            "[{}] {}: {}",
            self.created_at.with_timezone(&Local).format("%H:%M:%S"),
            speaker,
            self.render()
        )
    }
}

/// 会话内的聊天记录
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条消息并返回它的引用
    pub fn add_message(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// 纯文本导出，消息之间以空行分隔
    pub fn export_chat_log(&self) -> String {
        self.messages
            .iter()
            .map(ChatMessage::export_line)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// 导出到文件，必要时创建父目录
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {:?}", parent))?;
        }
        std::fs::write(path, self.export_chat_log())
            .context(format!("Failed to write chat log: {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_transcript() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.add_message(ChatMessage::user("Tell me about Google"));
        transcript.add_message(ChatMessage::assistant("Google is ...", "OpenAI"));
        transcript.add_message(ChatMessage::user("Thanks"));
        transcript
    }

    #[test]
    fn test_export_format_and_order() {
        let transcript = sample_transcript();

        assert_eq!(
            transcript.export_chat_log(),
            "USER (): Tell me about Google\n\nASSISTANT (OpenAI): Google is ...\n\nUSER (): Thanks"
        );
    }

    #[test]
    fn test_export_is_idempotent() {
        let transcript = sample_transcript();
        assert_eq!(transcript.export_chat_log(), transcript.export_chat_log());
    }

    #[test]
    fn test_export_empty_transcript() {
        assert_eq!(Transcript::new().export_chat_log(), "");
    }

    #[test]
    fn test_assistant_messages_carry_model() {
        let message = ChatMessage::assistant("hi", "Gemini");
        assert_eq!(message.role(), Role::Assistant);
        assert_eq!(message.model(), Some("Gemini"));
        assert_eq!(message.render(), "hi *(Gemini)*");

        let message = ChatMessage::user("hello");
        assert_eq!(message.model(), None);
        assert_eq!(message.render(), "hello");
    }

    #[test]
    fn test_history_line_carries_timestamp() {
        let message = ChatMessage::assistant("Try STAR answers", "OpenAI");
        let stamp = message
            .created_at()
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string();

        assert_eq!(
            message.history_line(),
            format!("[{}] Assistant: Try STAR answers *(OpenAI)*", stamp)
        );
        assert!(ChatMessage::user("hi").history_line().ends_with("] You: hi"));
    }

    #[test]
    fn test_messages_are_stamped_in_order() {
        let transcript = sample_transcript();
        let stamps: Vec<_> = transcript
            .messages()
            .iter()
            .map(ChatMessage::created_at)
            .collect();
        assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_add_message_returns_appended() {
        let mut transcript = Transcript::new();
        let added = transcript.add_message(ChatMessage::user("first")).clone();
        assert_eq!(added.text(), "first");
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut transcript = sample_transcript();
        transcript.clear();
        assert!(transcript.is_empty());
        assert_eq!(transcript.export_chat_log(), "");
    }

    #[test]
    fn test_save_writes_export() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("chat.txt");
        let transcript = sample_transcript();

        transcript.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, transcript.export_chat_log());
    }
}
