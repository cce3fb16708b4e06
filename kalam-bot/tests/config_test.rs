//! Env-based config loading and validation tests. Serialized because they
//! mutate process environment variables.

use kalam_bot::BotConfig;
use serial_test::serial;

fn clear_env() {
    for key in [
        "TELEGRAM_TOKEN",
        "BOT_TOKEN",
        "TELEGRAM_API_URL",
        "TELOXIDE_API_URL",
        "GOOGLE_API_KEY",
        "GEMINI_MODEL",
        "GEMINI_BASE_URL",
        "HANDWRITING_FONT",
        "LOG_FILE",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn load_uses_defaults_and_env() {
    clear_env();
    std::env::set_var("TELEGRAM_TOKEN", "tg-token");
    std::env::set_var("GOOGLE_API_KEY", "g-key");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token, "tg-token");
    assert_eq!(config.google_api_key, "g-key");
    assert_eq!(config.gemini_model, "gemini-1.5-flash-latest");
    assert_eq!(config.font_path, "assets/handwriting.ttf");
    assert_eq!(config.log_file, "logs/kalam-bot.log");
    assert!(config.telegram_api_url.is_none());
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn token_argument_overrides_env() {
    clear_env();
    std::env::set_var("TELEGRAM_TOKEN", "env-token");

    let config = BotConfig::load(Some("cli-token".to_string())).unwrap();
    assert_eq!(config.bot_token, "cli-token");
}

#[test]
#[serial]
fn bot_token_alias_is_accepted() {
    clear_env();
    std::env::set_var("BOT_TOKEN", "alias-token");

    let config = BotConfig::load(None).unwrap();
    assert_eq!(config.bot_token, "alias-token");
}

#[test]
#[serial]
fn missing_token_is_an_error() {
    clear_env();
    assert!(BotConfig::load(None).is_err());
}

#[test]
#[serial]
fn validate_requires_google_api_key() {
    clear_env();
    std::env::set_var("TELEGRAM_TOKEN", "tg-token");

    let config = BotConfig::load(None).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("GOOGLE_API_KEY"));
}

#[test]
#[serial]
fn validate_rejects_malformed_urls() {
    clear_env();
    std::env::set_var("TELEGRAM_TOKEN", "tg-token");
    std::env::set_var("GOOGLE_API_KEY", "g-key");
    std::env::set_var("TELEGRAM_API_URL", "not a url");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn gemini_overrides_are_loaded() {
    clear_env();
    std::env::set_var("TELEGRAM_TOKEN", "tg-token");
    std::env::set_var("GOOGLE_API_KEY", "g-key");
    std::env::set_var("GEMINI_MODEL", "gemini-1.5-pro");
    std::env::set_var("GEMINI_BASE_URL", "https://example.test/v1beta");

    let config = BotConfig::load(None).unwrap();
    assert_eq!(config.gemini_model, "gemini-1.5-pro");
    assert_eq!(
        config.gemini_base_url.as_deref(),
        Some("https://example.test/v1beta")
    );
    assert!(config.validate().is_ok());
}
