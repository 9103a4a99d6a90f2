mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod services;
mod workflow;

use std::io;
use std::sync::Arc;

use clap::Parser;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::llm::AnthropicClient;

#[derive(Parser)]
#[command(
    name = "release-notes",
    author,
    version,
    about = "Draft App Store release notes from the commits since the last tag"
)]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();
    logging::init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::from_env(&cwd)?;

    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    let language_model = Arc::new(AnthropicClient::from_config(&config));
    let context = AppContext::new(config, git, language_model);

    cmd::release_notes::run(&context, &mut io::stdout()).await?;
    Ok(())
}
