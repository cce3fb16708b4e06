//! Core types: user, chat, message, handler response, and the Handler/Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Name used when addressing the user in replies: first name, then username, then a neutral fallback.
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("there")
    }
}

/// Chat (group or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single incoming or outgoing message. A question arrives either as `text`
/// or as a photo (`photo_file_id` of the largest variant) with an optional `caption`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub text: Option<String>,
    pub photo_file_id: Option<String>,
    pub caption: Option<String>,
    pub direction: MessageDirection,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True when the message carries something answerable (text or a photo).
    pub fn has_question(&self) -> bool {
        self.photo_file_id.is_some() || self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// Direction of the message (from user or from bot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// Handler result for the chain. `Reply(text)` carries the answer body so
/// middleware can observe it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Stop the chain and attach the answer text.
    Reply(String),
}

/// Single handler concept: optional before / handle / after. The chain runs all
/// before hooks, then handle until Stop/Reply, then all after hooks in reverse.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

/// Cross-cutting hooks around the whole handler phase (logging, auth).
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Runs before any handler. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Runs after the handler phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: Option<&str>, photo: Option<&str>) -> Message {
        Message {
            id: "1".to_string(),
            user: User {
                id: 1,
                username: None,
                first_name: Some("Asha".to_string()),
                last_name: None,
            },
            chat: Chat {
                id: 1,
                chat_type: "private".to_string(),
            },
            text: text.map(str::to_string),
            photo_file_id: photo.map(str::to_string),
            caption: None,
            direction: MessageDirection::Incoming,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn has_question_for_text_and_photo() {
        assert!(message(Some("integrate x dx"), None).has_question());
        assert!(message(None, Some("file123")).has_question());
        assert!(!message(Some("  "), None).has_question());
        assert!(!message(None, None).has_question());
    }

    #[test]
    fn display_name_prefers_first_name() {
        let mut m = message(None, None);
        assert_eq!(m.user.display_name(), "Asha");
        m.user.first_name = None;
        m.user.username = Some("asha01".to_string());
        assert_eq!(m.user.display_name(), "asha01");
        m.user.username = None;
        assert_eq!(m.user.display_name(), "there");
    }
}
