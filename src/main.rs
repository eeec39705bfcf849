use anyhow::Result;
use career_assistant_rs::{cli, launch};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env中的API KEY需要在读取默认配置之前加载
    let _ = dotenvy::dotenv();

    let args = cli::Args::parse();
    let command = args.command();
    let config = args.into_config()?;

    init_tracing(config.verbose);

    launch(&config, command).await
}
