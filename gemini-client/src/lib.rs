//! Google Gemini text-generation client.
//!
//! Thin REST client for `models/{model}:generateContent`: a text question,
//! optionally with an inline JPEG (the photographed problem), in; the first
//! candidate's text out. No streaming.

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Masks an API key for safe logging: first 7 + "***" + last 4 chars;
/// keys of length <= 11 are fully masked as "***".
pub fn mask_key(key: &str) -> String {
    if key.len() <= 11 {
        "***".to_string()
    } else {
        format!(
            "{}***{}",
            &key[..7.min(key.len())],
            &key[key.len().saturating_sub(4)..]
        )
    }
}

/// An image sent alongside the question, base64-encoded on the wire.
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl InlineImage {
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self {
            mime_type: "image/jpeg".to_string(),
            data,
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Creates a client for the public Gemini API endpoint.
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Uses a custom base URL (e.g. a regional or proxy endpoint).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Overrides the model name.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends the question (and optional problem photo) to Gemini and returns
    /// the text of the first candidate.
    #[instrument(skip(self, system_instruction, question, image))]
    pub async fn generate_content(
        &self,
        system_instruction: &str,
        question: &str,
        image: Option<InlineImage>,
    ) -> Result<String> {
        let request = GenerateContentRequest::new(system_instruction, question, image);

        info!(
            model = %self.model,
            api_key = %mask_key(&self.api_key),
            has_image = request.has_image(),
            question_preview = %question.chars().take(100).collect::<String>(),
            "Gemini generateContent request"
        );

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error {}: {}", status, body);
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.first_candidate_text();
        match text {
            Some(text) => {
                info!(answer_len = text.len(), "Gemini generateContent completed");
                Ok(text)
            }
            None => anyhow::bail!("No candidates in Gemini response"),
        }
    }
}

// --- Wire types (camelCase per the REST API) ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    fn new(system_instruction: &str, question: &str, image: Option<InlineImage>) -> Self {
        let mut parts = vec![Part::text(question)];
        if let Some(image) = image {
            parts.push(Part::inline_data(&image.mime_type, &image.data));
        }
        Self {
            system_instruction: (!system_instruction.is_empty()).then(|| Content {
                role: None,
                parts: vec![Part::text(system_instruction)],
            }),
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
        }
    }

    fn has_image(&self) -> bool {
        self.contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .any(|p| p.inline_data.is_some())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: &str, data: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: STANDARD.encode(data),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if any.
    fn first_candidate_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        Some(text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_shape_text_only() {
        let request = GenerateContentRequest::new("Be brief.", "What is inertia?", None);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "Be brief."
        );
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "What is inertia?");
        assert!(json["contents"][0]["parts"][0].get("inlineData").is_none());
    }

    #[test]
    fn request_wire_shape_with_image() {
        let request = GenerateContentRequest::new(
            "",
            "Solve this.",
            Some(InlineImage::jpeg(vec![0xFF, 0xD8, 0xFF])),
        );
        let json = serde_json::to_value(&request).unwrap();

        // Empty system instruction is omitted entirely.
        assert!(json.get("systemInstruction").is_none());
        let part = &json["contents"][0]["parts"][1]["inlineData"];
        assert_eq!(part["mimeType"], "image/jpeg");
        assert_eq!(part["data"], STANDARD.encode([0xFF, 0xD8, 0xFF]));
    }

    #[test]
    fn response_first_candidate_text_is_joined() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Step 1. "},{"text":"Step 2."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.first_candidate_text().as_deref(), Some("Step 1. Step 2."));
    }

    #[test]
    fn response_without_candidates_yields_none() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.first_candidate_text().is_none());
    }
}
