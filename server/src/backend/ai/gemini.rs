//! Gemini `generateContent` client.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::{AiError, GenerativeModel, Part, DEFAULT_MODEL};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

// ============================================================================
// Gemini API types
// ============================================================================

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

/// Client for a hosted Gemini model. Cheap to clone.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        info!("Gemini client ready: model={}", config.model);
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, parts: Vec<Part>) -> Result<String, AiError> {
        let b64 = base64::engine::general_purpose::STANDARD;
        let request_parts = parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => RequestPart::Text {
                    text: text.as_str(),
                },
                Part::InlineImage { mime_type, data } => RequestPart::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.as_str(),
                        data: b64.encode(data),
                    },
                },
            })
            .collect();

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: request_parts,
            }],
        };

        debug!("POST {} with {} parts", self.endpoint(), parts.len());
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!("Gemini returned {}: {}", status, message);
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(text)
    }
}
