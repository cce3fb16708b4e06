//! /start command handler: greets the user and explains how to ask.

use async_trait::async_trait;
use kalam_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{info, instrument};

/// Greets the user on /start and stops the chain; everything else continues on
/// to the doubt handler.
pub struct StartHandler {
    bot: Arc<dyn Bot>,
}

impl StartHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }

    /// True for "/start", with or without a bot mention or arguments.
    /// Public for tests.
    pub fn is_start_command(text: &str) -> bool {
        let text = text.trim();
        text == "/start" || text.starts_with("/start@") || text.starts_with("/start ")
    }

    fn greeting(message: &Message) -> String {
        format!(
            "👋 Hello {}!\n\n\
             I am a doubt-solver bot. 🤖\n\
             Send me a photo of a question or type it out.\n\
             You will get the solution back as a handwritten note!",
            message.user.display_name()
        )
    }
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(text) = message.text.as_deref() else {
            return Ok(HandlerResponse::Continue);
        };
        if !Self::is_start_command(text) {
            return Ok(HandlerResponse::Continue);
        }

        info!(user_id = message.user.id, "Greeting user on /start");
        self.bot
            .reply_to(message, &Self::greeting(message))
            .await?;
        Ok(HandlerResponse::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kalam_core::{Chat, MessageDirection, User};
    use std::sync::Mutex;

    struct MockBot {
        sent: Mutex<Vec<String>>,
    }

    impl MockBot {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Bot for MockBot {
        async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
        async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
            self.send_message(&message.chat, text).await
        }
        async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
            self.send_message(chat, text).await?;
            Ok("1".to_string())
        }
        async fn edit_message(&self, _chat: &Chat, _message_id: &str, _text: &str) -> Result<()> {
            Ok(())
        }
        async fn delete_message(&self, _chat: &Chat, _message_id: &str) -> Result<()> {
            Ok(())
        }
        async fn send_photo(
            &self,
            _chat: &Chat,
            _jpeg: Vec<u8>,
            _caption: Option<&str>,
        ) -> Result<()> {
            Ok(())
        }
        async fn download_file(&self, _file_id: &str) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn message(text: Option<&str>) -> Message {
        Message {
            id: "10".to_string(),
            user: User {
                id: 7,
                username: None,
                first_name: Some("Ravi".to_string()),
                last_name: None,
            },
            chat: Chat {
                id: 70,
                chat_type: "private".to_string(),
            },
            text: text.map(str::to_string),
            photo_file_id: None,
            caption: None,
            direction: MessageDirection::Incoming,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_start_command() {
        assert!(StartHandler::is_start_command("/start"));
        assert!(StartHandler::is_start_command("  /start  "));
        assert!(StartHandler::is_start_command("/start@doubtbot"));
        assert!(StartHandler::is_start_command("/start hello"));
        assert!(!StartHandler::is_start_command("/started"));
        assert!(!StartHandler::is_start_command("start"));
        assert!(!StartHandler::is_start_command("what is /start"));
    }

    #[tokio::test]
    async fn test_start_replies_and_stops() {
        let bot = Arc::new(MockBot::new());
        let handler = StartHandler::new(bot.clone());

        let response = handler.handle(&message(Some("/start"))).await.unwrap();

        assert_eq!(response, HandlerResponse::Stop);
        let sent = bot.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Hello Ravi"));
    }

    #[tokio::test]
    async fn test_other_text_continues() {
        let bot = Arc::new(MockBot::new());
        let handler = StartHandler::new(bot.clone());

        let response = handler
            .handle(&message(Some("what is torque?")))
            .await
            .unwrap();

        assert_eq!(response, HandlerResponse::Continue);
        assert!(bot.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_photo_only_message_continues() {
        let bot = Arc::new(MockBot::new());
        let handler = StartHandler::new(bot);
        let response = handler.handle(&message(None)).await.unwrap();
        assert_eq!(response, HandlerResponse::Continue);
    }
}
