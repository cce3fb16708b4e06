//! # kalam-core
//!
//! Core types and traits for the doubt-solver bot: [`Bot`], [`Handler`], [`Middleware`],
//! message and user types, and tracing initialization. Transport-agnostic; the teloxide
//! adapter lives in kalam-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{HandlerError, KalamError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, MessageDirection, Middleware, User};
