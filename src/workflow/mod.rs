use crate::assistant::{CareerAssistant, QuickAction};
use crate::cli::Command;
use crate::config::Config;

use anyhow::Result;
use std::time::Instant;
use tracing::info;

pub mod chat;

/// 执行一次快捷操作并打印回复
async fn run_once(assistant: &mut CareerAssistant, action: QuickAction) -> Result<()> {
    println!("📋 {}", action.title());
    println!("{}", action.progress_message());
    let started = Instant::now();

    let reply = assistant.submit(action).await?;
    println!("\n{}\n", reply.render());

    info!(elapsed_ms = started.elapsed().as_millis() as u64, "request finished");
    Ok(())
}

/// 退出前按配置导出聊天记录
fn export_on_exit(assistant: &CareerAssistant, config: &Config) -> Result<()> {
    if !config.transcript.export_on_exit || assistant.transcript().is_empty() {
        return Ok(());
    }
    let path = &config.transcript.export_path;
    assistant.transcript().save(path)?;
    println!("💾 聊天记录已导出: {}", path.display());
    Ok(())
}

/// 启动职业助手
pub async fn launch(config: &Config, command: Command) -> Result<()> {
    let mut assistant = CareerAssistant::from_config(config)?;
    info!(
        session = %assistant.id(),
        provider = %assistant.provider(),
        "career assistant started"
    );

    let outcome = match command.into_quick_action()? {
        Some(action) => run_once(&mut assistant, action).await,
        None => chat::run(&mut assistant, config).await,
    };

    export_on_exit(&assistant, config)?;
    outcome
}
