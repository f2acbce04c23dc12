//! Request and response types for the card service API.

pub mod styles;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /generate`.
///
/// Missing fields deserialize to empty strings so the handler can reject them
/// with the documented message instead of a serde error.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Base64-encoded source photo.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub image_base64: String,

    /// Key into the background style catalog.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub background: String,

    /// MIME type of the source photo; defaults to image/jpeg.
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Successful `POST /generate` response.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub image: ImageArtifact,
}

/// The generated image artifact relayed to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageArtifact {
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}
