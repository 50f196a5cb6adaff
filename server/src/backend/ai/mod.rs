//! # AI Client Layer
//!
//! One prompt in, one response out. The domain layer talks to a
//! [`GenerativeModel`]; [`GeminiClient`] is the hosted implementation.
//! Prompt text lives in [`prompts`] and the JSON clean-up for scanned
//! receipts in [`receipt`].

pub mod gemini;
pub mod prompts;
pub mod receipt;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::{GeminiClient, GeminiConfig};
pub use receipt::{parse_receipt_response, ReceiptData};

/// Default hosted model
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

/// One piece of a prompt
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    InlineImage { mime_type: String, data: Vec<u8> },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn image(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Part::InlineImage {
            mime_type: mime_type.into(),
            data,
        }
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    #[error("Request to the AI service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("AI service returned no text")]
    EmptyResponse,

    #[error("Could not read the receipt: {0}")]
    MalformedReceipt(String),
}

/// A text generation model that accepts text and inline images
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, parts: Vec<Part>) -> Result<String, AiError>;
}
