//! Component factory: builds BotComponents from config. Isolates assembly logic
//! from the runner so tests can inject a mock Bot.

use anyhow::Result;
use gemini_client::GeminiClient;
use handler_chain::HandlerChain;
use handwriting::{HandwritingRenderer, PageFont};
use solver_handlers::{DoubtHandler, StartHandler};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::middleware::LoggingMiddleware;
use crate::telegram::TelegramBotAdapter;

/// Core dependencies for run_bot; produced by the component factory.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: Bot,
    /// Delivery used by handlers; a mock in tests, [`TelegramBotAdapter`] in production.
    pub bot: Arc<dyn kalam_core::Bot>,
    pub gemini: Arc<GeminiClient>,
    pub renderer: Arc<HandwritingRenderer>,
}

/// Builds BotComponents. When `bot_override` is set (tests), it replaces the
/// Telegram adapter as the delivery the handlers see.
#[instrument(skip(config, bot_override))]
pub fn build_bot_components(
    config: &BotConfig,
    bot_override: Option<Arc<dyn kalam_core::Bot>>,
) -> Result<BotComponents> {
    let teloxide_bot = {
        let bot = Bot::new(config.bot_token.clone());
        if let Some(ref url_str) = config.telegram_api_url {
            match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            }
        } else {
            bot
        }
    };

    let bot: Arc<dyn kalam_core::Bot> = match bot_override {
        Some(b) => b,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    let mut gemini = GeminiClient::new(config.google_api_key.clone())
        .with_model(config.gemini_model.clone());
    if let Some(base_url) = &config.gemini_base_url {
        gemini = gemini.with_base_url(base_url.clone());
    }

    // Font resolution logs its own degradation when the preferred face is absent.
    let font = PageFont::load(&config.font_path);
    info!(
        font_path = %config.font_path,
        fallback = font.is_fallback(),
        model = %gemini.model(),
        "Bot components built"
    );

    Ok(BotComponents {
        teloxide_bot,
        bot,
        gemini: Arc::new(gemini),
        renderer: Arc::new(HandwritingRenderer::new(font)),
    })
}

/// Builds the handler chain (logging → /start greeting → doubt solving).
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    let start_handler = Arc::new(StartHandler::new(components.bot.clone()));
    let doubt_handler = Arc::new(DoubtHandler::new(
        components.gemini.clone(),
        components.renderer.clone(),
        components.bot.clone(),
    ));
    HandlerChain::new()
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_handler(start_handler)
        .add_handler(doubt_handler)
}
