//! Image generation provider abstraction.
//!
//! A trait-based seam between the HTTP handlers and the remote generation
//! capability, so tests can swap in a mock without touching the network.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The remote call succeeded but produced no image artifact. When the
    /// model explained itself in a text part, that text is carried here.
    #[error("no image artifact in response")]
    NoImage { explanation: Option<String> },

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// An image artifact produced by a provider.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64-encoded image bytes, exactly as the provider returned them.
    pub data: String,
}

/// A model visible to the configured credential.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub supported_methods: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_token_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_token_limit: Option<i64>,
}

impl ModelInfo {
    /// Whether this model looks usable for image generation.
    pub fn supports_image_generation(&self) -> bool {
        self.supported_methods
            .iter()
            .any(|m| m == "generateContent")
            && self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains("image"))
    }
}

/// Trait for image transformation providers (e.g., Gemini).
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Submit one multimodal generation call: the style instruction plus the
    /// inline image payload. Returns the first image artifact in the response.
    async fn transform(
        &self,
        instruction: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<GeneratedImage, ProviderError>;

    /// List the models available to the configured credential.
    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError>;

    /// Attempt a trivial text generation against the given model identifier.
    /// Returns the model's text reply on success.
    async fn probe_model(&self, model: &str) -> Result<String, ProviderError>;
}
