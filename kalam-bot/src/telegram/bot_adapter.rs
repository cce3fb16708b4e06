//! Wraps teloxide::Bot and implements [`kalam_core::Bot`]. Production sends go
//! through Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use kalam_core::{parse_message_id, Bot as CoreBot, Chat, KalamError, Message, Result};
use std::io::Cursor;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, InputFile, MessageId};

/// Thin wrapper around teloxide::Bot implementing the core Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| KalamError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| KalamError::Bot(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text.to_string())
            .await
            .map_err(|e| KalamError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .delete_message(ChatId(chat.id), MessageId(id))
            .await
            .map_err(|e| KalamError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_photo(&self, chat: &Chat, jpeg: Vec<u8>, caption: Option<&str>) -> Result<()> {
        let photo = InputFile::memory(jpeg).file_name("solution.jpg");
        let mut request = self.bot.send_photo(ChatId(chat.id), photo);
        if let Some(caption) = caption {
            request = request.caption(caption.to_string());
        }
        request
            .await
            .map_err(|e| KalamError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(|e| KalamError::Bot(e.to_string()))?;

        let mut buf = Cursor::new(Vec::new());
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(|e| KalamError::Bot(e.to_string()))?;
        Ok(buf.into_inner())
    }
}
