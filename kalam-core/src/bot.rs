//! Delivery abstraction for sending replies and fetching user photos.
//!
//! [`Bot`] is transport-agnostic; the teloxide implementation lives in kalam-bot
//! so handlers can be driven by mock bots in tests.

use crate::error::{KalamError, Result};
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction over the chat transport. `message_id` values are the transport's
/// ids round-tripped as strings (Telegram uses numeric ids).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends a message and returns its id, so a "thinking" placeholder can be
    /// edited or deleted once the answer is ready.
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;
    /// Edits an already-sent message.
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Deletes an already-sent message.
    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;
    /// Sends an in-memory JPEG as a photo attachment with an optional caption.
    async fn send_photo(&self, chat: &Chat, jpeg: Vec<u8>, caption: Option<&str>) -> Result<()>;
    /// Downloads a file (e.g. a question photo) by its transport file id.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;
}

/// Parses a message id string into an i32. Used by edit/delete in the adapter.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| KalamError::Bot(format!("Invalid message_id: {}", s)))
}
