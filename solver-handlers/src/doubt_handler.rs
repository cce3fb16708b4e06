//! Doubt handler: question in (text or photo), handwritten-page answer out.
//!
//! Flow per message: resolve the question, post a "thinking" placeholder, ask
//! Gemini (downloading the photo first when needed), render the answer as a
//! notebook page, send it as a photo, delete the placeholder.

use async_trait::async_trait;
use gemini_client::{GeminiClient, InlineImage};
use handwriting::HandwritingRenderer;
use kalam_core::{Bot, Handler, HandlerResponse, KalamError, Message, Result};
use std::sync::Arc;
use tracing::{error, info, instrument};

// --- User-facing messages (sent to the chat on the error paths) ---
const MSG_NO_CONTENT: &str = "❌ Please send a question as text or a photo.";
const MSG_REQUEST_FAILED: &str =
    "⚠️ Something went wrong. Maybe the question was unclear, please try again.";
const MSG_SEND_FAILED: &str = "⚠️ Sorry, sending the solution failed.";

/// Prompt used when a photo arrives without a caption.
const DEFAULT_PHOTO_PROMPT: &str = "Solve this.";

/// Answers must come out as plain notebook text; the renderer draws lines,
/// not LaTeX or Markdown.
const SYSTEM_INSTRUCTION: &str = "You are a JEE expert. Solve this problem step-by-step. \
     IMPORTANT: Do not use complex LaTeX or Markdown formatting. \
     Write in plain text as if writing in a notebook. \
     Use words like 'integral' instead of symbols if possible. Keep it clean.";

/// A resolved question: either plain text, or a photo to download with its prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    Text(String),
    Photo { file_id: String, prompt: String },
}

impl Question {
    /// Pulls the question out of a message: photos win (their caption is the
    /// prompt, defaulting to "Solve this."), then non-blank text. None when
    /// the message carries neither. Public for tests.
    pub fn from_message(message: &Message) -> Option<Self> {
        if let Some(file_id) = &message.photo_file_id {
            let prompt = message
                .caption
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(DEFAULT_PHOTO_PROMPT);
            return Some(Self::Photo {
                file_id: file_id.clone(),
                prompt: prompt.to_string(),
            });
        }
        let text = message.text.as_deref()?.trim();
        (!text.is_empty()).then(|| Self::Text(text.to_string()))
    }
}

/// Turns questions into handwritten answers via Gemini and the page renderer.
pub struct DoubtHandler {
    gemini: Arc<GeminiClient>,
    renderer: Arc<HandwritingRenderer>,
    bot: Arc<dyn Bot>,
}

impl DoubtHandler {
    pub fn new(
        gemini: Arc<GeminiClient>,
        renderer: Arc<HandwritingRenderer>,
        bot: Arc<dyn Bot>,
    ) -> Self {
        Self {
            gemini,
            renderer,
            bot,
        }
    }

    /// Logs an error and its cause chain. First item with `first_msg`, rest with "Caused by".
    fn log_error_chain(e: &anyhow::Error, first_msg: &str) {
        for (i, cause) in e.chain().enumerate() {
            if i == 0 {
                error!(cause = %cause, "{}", first_msg);
            } else {
                error!(cause = %cause, "Caused by");
            }
        }
    }

    async fn ask_gemini(&self, question: &Question) -> anyhow::Result<String> {
        match question {
            Question::Text(text) => {
                self.gemini
                    .generate_content(SYSTEM_INSTRUCTION, text, None)
                    .await
            }
            Question::Photo { file_id, prompt } => {
                let bytes = self.bot.download_file(file_id).await?;
                info!(file_id = %file_id, bytes = bytes.len(), "Downloaded question photo");
                self.gemini
                    .generate_content(SYSTEM_INSTRUCTION, prompt, Some(InlineImage::jpeg(bytes)))
                    .await
            }
        }
    }

    /// Sends a fallback message and returns Stop. Used on the error paths.
    async fn send_fallback_and_stop(
        &self,
        message: &Message,
        text: &str,
    ) -> Result<HandlerResponse> {
        let _ = self.bot.reply_to(message, text).await;
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for DoubtHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(question) = Question::from_message(message) else {
            info!(user_id = message.user.id, "Message has no question content");
            return self.send_fallback_and_stop(message, MSG_NO_CONTENT).await;
        };

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            question = ?question,
            "Processing doubt"
        );

        let name = message.user.display_name().to_string();
        let thinking = format!("⏳ Thinking, {}... (Processing)", name);
        let thinking_id = match self
            .bot
            .send_message_and_return_id(&message.chat, &thinking)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Failed to send thinking placeholder");
                return self.send_fallback_and_stop(message, MSG_SEND_FAILED).await;
            }
        };

        let answer = match self.ask_gemini(&question).await {
            Ok(a) => a,
            Err(e) => {
                Self::log_error_chain(&e, "Failed to get Gemini answer");
                let _ = self
                    .bot
                    .edit_message(&message.chat, &thinking_id, MSG_REQUEST_FAILED)
                    .await;
                return Ok(HandlerResponse::Stop);
            }
        };

        // Rendering only fails on a JPEG-encode failure; there is no recovery,
        // so surface it after telling the user.
        let page = match self.renderer.render(&answer) {
            Ok(p) => p,
            Err(e) => {
                error!(error = %e, "Failed to render handwriting page");
                let _ = self
                    .bot
                    .edit_message(&message.chat, &thinking_id, MSG_REQUEST_FAILED)
                    .await;
                return Err(KalamError::Bot(format!(
                    "handwriting render failed: {}",
                    e
                )));
            }
        };

        let caption = format!("📝 Solution for {}", name);
        if let Err(e) = self
            .bot
            .send_photo(&message.chat, page, Some(&caption))
            .await
        {
            error!(error = %e, "Failed to send solution photo");
            return self.send_fallback_and_stop(message, MSG_SEND_FAILED).await;
        }

        if let Err(e) = self.bot.delete_message(&message.chat, &thinking_id).await {
            // Placeholder cleanup is cosmetic; the answer already went out.
            info!(error = %e, "Could not delete thinking placeholder");
        }

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            answer_len = answer.len(),
            "Solution photo sent"
        );
        Ok(HandlerResponse::Reply(answer))
    }
}
