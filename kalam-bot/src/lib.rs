//! # kalam-bot
//!
//! Telegram doubt-solver application: wires config, the Gemini client, the
//! handwriting renderer, and the handler chain, then runs the teloxide REPL.
//! Core types live in kalam-core; handlers in solver-handlers.

pub mod cli;
pub mod components;
pub mod config;
pub mod middleware;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::BotConfig;
pub use middleware::LoggingMiddleware;
pub use runner::run_bot;
pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};
