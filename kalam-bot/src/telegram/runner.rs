//! REPL runner: converts teloxide messages to core messages and hands them to
//! the HandlerChain (spawned per update so the REPL never blocks).

use anyhow::Result;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Starts the REPL with the given teloxide Bot and HandlerChain. Logs the bot
/// identity via get_me() first; each update is converted to a core message and
/// dispatched to chain.handle in its own task.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            info!(
                username = %me.user.username.as_deref().unwrap_or("unknown"),
                "Bot authorized"
            );
        }
        Err(e) => {
            error!(error = %e, "get_me failed, check TELEGRAM_TOKEN");
        }
    }

    let chain = handler_chain;
    teloxide::repl(
        bot,
        move |_bot: Bot, msg: teloxide::types::Message| {
            let chain = chain.clone();

            async move {
                let core_msg = TelegramMessageWrapper(&msg).to_core();

                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    has_text = core_msg.text.is_some(),
                    has_photo = core_msg.photo_file_id.is_some(),
                    "Received update"
                );

                // Run the chain in a spawned task so the REPL returns immediately.
                let chain_for_task = chain.clone();
                tokio::spawn(async move {
                    if let Err(e) = chain_for_task.handle(&core_msg).await {
                        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                    }
                });

                Ok(())
            }
        },
    )
    .await;

    Ok(())
}
