//! Main entry: init logging, validate config, build components, run the REPL.

use anyhow::Result;
use kalam_core::init_tracing;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::telegram::run_repl;

/// Runs the bot until the process is stopped: validate → tracing → components
/// → handler chain → teloxide REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    std::fs::create_dir_all("logs")?;
    init_tracing(&config.log_file)?;

    info!(
        gemini_model = %config.gemini_model,
        font_path = %config.font_path,
        "Initializing bot"
    );

    let components = build_bot_components(&config, None)?;
    let handler_chain = build_handler_chain(&components);
    let teloxide_bot = components.teloxide_bot.clone();

    info!("Bot started successfully");

    run_repl(teloxide_bot, handler_chain).await?;

    Ok(())
}
