//! Bot config: Telegram connection, Gemini, renderer font, logging. Loaded from env.

use anyhow::Result;
use std::env;

/// Application config. Use [`BotConfig::load`] for env-based loading and call
/// [`BotConfig::validate`] before init to fail fast.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// TELEGRAM_TOKEN (alias BOT_TOKEN)
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// GOOGLE_API_KEY (required)
    pub google_api_key: String,
    /// GEMINI_MODEL
    pub gemini_model: String,
    /// GEMINI_BASE_URL (regional/proxy endpoint)
    pub gemini_base_url: Option<String>,
    /// HANDWRITING_FONT; absence of the file falls back to the built-in face
    pub font_path: String,
    /// Log file path
    pub log_file: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides TELEGRAM_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("TELEGRAM_TOKEN")
                .or_else(|_| env::var("BOT_TOKEN"))
                .map_err(|_| anyhow::anyhow!("TELEGRAM_TOKEN (or BOT_TOKEN) not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let google_api_key = env::var("GOOGLE_API_KEY").unwrap_or_default();
        let gemini_model = env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-1.5-flash-latest".to_string());
        let gemini_base_url = env::var("GEMINI_BASE_URL").ok();
        let font_path = env::var("HANDWRITING_FONT")
            .unwrap_or_else(|_| "assets/handwriting.ttf".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/kalam-bot.log".to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            google_api_key,
            gemini_model,
            gemini_base_url,
            font_path,
            log_file,
        })
    }

    /// Validate config: the Gemini key must be present and any URL overrides parsable.
    pub fn validate(&self) -> Result<()> {
        if self.google_api_key.is_empty() {
            anyhow::bail!("GOOGLE_API_KEY is required. Set it in .env or environment.");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if let Some(ref url_str) = self.gemini_base_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("GEMINI_BASE_URL is set but not a valid URL: {}", url_str);
            }
        }
        Ok(())
    }
}
