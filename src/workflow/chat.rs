//! 交互式聊天：基于rustyline的REPL

use anyhow::Result;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::path::PathBuf;

use crate::assistant::CareerAssistant;
use crate::config::{Config, LLMProvider};

const CHAT_COMMANDS: &[&str] = &["/provider", "/clear", "/export", "/history", "/help", "/quit"];

const HELP_TEXT: &str = "\
Commands:
  /provider openai|gemini   switch the language model
  /clear                    clear the chat history
  /export [path]            save the chat log to a file
  /history                  show the chat history
  /help                     show this help
  /quit                     leave the chat
Anything else is sent to the assistant as a question.";

/// 一行输入对应的操作
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    Ask(String),
    Provider(LLMProvider),
    Clear,
    Export(Option<PathBuf>),
    History,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// 解析一行输入；未识别的 `/` 开头内容也按提问处理
pub fn parse_chat_line(line: &str) -> ChatCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ChatCommand::Empty;
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    match head {
        "/provider" => match rest.parse::<LLMProvider>() {
            Ok(provider) => ChatCommand::Provider(provider),
            Err(_) if rest.is_empty() => {
                ChatCommand::Invalid("usage: /provider openai|gemini".to_string())
            }
            Err(e) => ChatCommand::Invalid(e),
        },
        "/clear" => ChatCommand::Clear,
        "/export" if rest.is_empty() => ChatCommand::Export(None),
        "/export" => ChatCommand::Export(Some(PathBuf::from(rest))),
        "/history" => ChatCommand::History,
        "/help" => ChatCommand::Help,
        "/quit" | "/exit" | "quit" | "exit" => ChatCommand::Quit,
        _ => ChatCommand::Ask(trimmed.to_string()),
    }
}

/// 聊天命令补全与提示
#[derive(Clone)]
struct ChatHelper {
    commands: Vec<String>,
}

impl ChatHelper {
    fn new() -> Self {
        Self {
            commands: CHAT_COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Highlighter for ChatHelper {}

impl Validator for ChatHelper {}

fn print_history(assistant: &CareerAssistant) {
    let transcript = assistant.transcript();
    if transcript.is_empty() {
        println!("📭 聊天记录为空");
        return;
    }
    for message in transcript.messages() {
        println!("{}\n", message.history_line());
    }
}

fn export(assistant: &CareerAssistant, path: &std::path::Path) {
    match assistant.transcript().save(path) {
        Ok(()) => println!("💾 聊天记录已导出: {}", path.display()),
        Err(e) => eprintln!("❌ 导出失败: {:#}", e),
    }
}

/// 运行交互式聊天，直到用户退出
pub async fn run(assistant: &mut CareerAssistant, config: &Config) -> Result<()> {
    let mut rl: Editor<ChatHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ChatHelper::new()));

    println!("💼 Career Assistant ({})", assistant.provider().label());
    println!("输入问题开始对话，/help 查看命令，/quit 退出");
    println!();

    loop {
        let line = match rl.readline("you> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("⚠️ 检测到 CTRL-C，输入 /quit 退出");
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        let command = parse_chat_line(&line);
        if command != ChatCommand::Empty {
            let _ = rl.add_history_entry(line.trim());
        }

        match command {
            ChatCommand::Empty => continue,
            ChatCommand::Quit => break,
            ChatCommand::Help => println!("{}", HELP_TEXT),
            ChatCommand::History => print_history(assistant),
            ChatCommand::Clear => {
                assistant.clear();
                println!("🧹 聊天记录已清空");
            }
            ChatCommand::Export(path) => {
                let path = path.unwrap_or_else(|| config.transcript.export_path.clone());
                export(assistant, &path);
            }
            ChatCommand::Provider(provider) => {
                if assistant.select_provider(provider) {
                    println!("🔄 已切换到 {}", provider.label());
                } else {
                    println!("✓ 当前已在使用 {}", provider.label());
                }
            }
            ChatCommand::Invalid(message) => eprintln!("⚠️ {}", message),
            ChatCommand::Ask(question) => {
                println!("🤖 Thinking...");
                match assistant.ask(&question).await {
                    Ok(reply) => println!("\n{}\n", reply.render()),
                    Err(e) => eprintln!("❌ {}", e),
                }
            }
        }
    }

    println!("👋 再见");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            parse_chat_line("  Tell me about Google  "),
            ChatCommand::Ask("Tell me about Google".to_string())
        );
        assert_eq!(
            parse_chat_line("/unknown thing"),
            ChatCommand::Ask("/unknown thing".to_string())
        );
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse_chat_line(""), ChatCommand::Empty);
        assert_eq!(parse_chat_line("   "), ChatCommand::Empty);
    }

    #[test]
    fn test_provider_command() {
        assert_eq!(
            parse_chat_line("/provider Gemini"),
            ChatCommand::Provider(LLMProvider::Gemini)
        );
        assert_eq!(
            parse_chat_line("/provider openai"),
            ChatCommand::Provider(LLMProvider::OpenAI)
        );
        assert!(matches!(parse_chat_line("/provider"), ChatCommand::Invalid(_)));
        assert_eq!(
            parse_chat_line("/provider claude"),
            ChatCommand::Invalid("Unknown provider: claude".to_string())
        );
    }

    #[test]
    fn test_export_command() {
        assert_eq!(parse_chat_line("/export"), ChatCommand::Export(None));
        assert_eq!(
            parse_chat_line("/export logs/today.txt"),
            ChatCommand::Export(Some(PathBuf::from("logs/today.txt")))
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_chat_line("/clear"), ChatCommand::Clear);
        assert_eq!(parse_chat_line("/history"), ChatCommand::History);
        assert_eq!(parse_chat_line("/help"), ChatCommand::Help);
        assert_eq!(parse_chat_line("/quit"), ChatCommand::Quit);
        assert_eq!(parse_chat_line("exit"), ChatCommand::Quit);
    }

    #[test]
    fn test_help_lists_every_command() {
        for command in CHAT_COMMANDS {
            assert!(HELP_TEXT.contains(command), "missing {}", command);
        }
    }
}
