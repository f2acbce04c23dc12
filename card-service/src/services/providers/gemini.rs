//! Gemini image provider implementation.
//!
//! Calls Google's generateContent API with a text instruction and an inline
//! image payload, then extracts the first image artifact from the response.

use super::{GeneratedImage, ImageProvider, ModelInfo, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fixed generation tuning. Held as static policy, never request-controlled.
const TEMPERATURE: f32 = 0.9;
const TOP_K: i32 = 32;
const TOP_P: f32 = 1.0;
const MAX_OUTPUT_TOKENS: i32 = 4096;

/// Prompt used when probing whether a model identifier works at all.
const PROBE_PROMPT: &str = "Say 'hello' in one word";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

/// Gemini image provider.
pub struct GeminiImageProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiImageProvider {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            GEMINI_API_BASE, model, method, self.config.api_key
        )
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = self.api_url(model, "generateContent");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status,
                message: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ImageProvider for GeminiImageProvider {
    async fn transform(
        &self,
        instruction: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<GeneratedImage, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(instruction), Part::inline(mime_type, image_base64)],
            }],
            generation_config: Some(GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            }),
        };

        tracing::debug!(
            model = %self.config.model,
            mime_type,
            payload_len = image_base64.len(),
            "Sending request to Gemini API"
        );

        let api_response = self.generate_content(&self.config.model, &request).await?;

        let parts = api_response
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts)
            .unwrap_or_default();

        extract_artifact(parts)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        let url = format!("{}/models?key={}", GEMINI_API_BASE, self.config.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status,
                message: error_text,
            });
        }

        let listing: ModelListResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(listing
            .models
            .into_iter()
            .map(|m| ModelInfo {
                name: m.name,
                display_name: m.display_name,
                description: m.description,
                supported_methods: m.supported_generation_methods,
                input_token_limit: m.input_token_limit,
                output_token_limit: m.output_token_limit,
            })
            .collect())
    }

    async fn probe_model(&self, model: &str) -> Result<String, ProviderError> {
        // Plain text request, no tuning: the point is only to see whether the
        // model identifier is usable with this credential.
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(PROBE_PROMPT)],
            }],
            generation_config: None,
        };

        let api_response = self.generate_content(model, &request).await?;

        api_response
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts)
            .unwrap_or_default()
            .into_iter()
            .find_map(|part| part.text)
            .ok_or_else(|| ProviderError::InvalidResponse("no text in probe response".to_string()))
    }
}

/// Pick the artifact out of the response parts.
///
/// First part carrying inline data wins, in document order, no ranking; a
/// part holding both text and inline data counts as an artifact. When no part
/// carries inline data, the first non-empty text part becomes the failure
/// explanation; with neither, the explanation is absent and callers fall back
/// to a generic message.
fn extract_artifact(parts: Vec<Part>) -> Result<GeneratedImage, ProviderError> {
    let mut explanation = None;

    for part in parts {
        if let Some(inline) = part.inline_data {
            return Ok(GeneratedImage {
                mime_type: inline.mime_type,
                data: inline.data,
            });
        }

        if explanation.is_none() {
            if let Some(text) = part.text {
                if !text.is_empty() {
                    explanation = Some(text);
                }
            }
        }
    }

    Err(ProviderError::NoImage { explanation })
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

/// One response content part. The API can return shapes beyond text and
/// inline data (function calls, thought annotations); those deserialize with
/// both fields absent and extraction skips them.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Part {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: i32,
    top_p: f32,
    max_output_tokens: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Content,
    #[serde(default)]
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelListResponse {
    #[serde(default)]
    models: Vec<ApiModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiModel {
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
    #[serde(default)]
    input_token_limit: Option<i64>,
    #[serde(default)]
    output_token_limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_data_wins_over_text() {
        let image = extract_artifact(vec![
            Part::text("Here is your festive photo!"),
            Part::inline("image/png", "aGVsbG8="),
            Part::text("trailing commentary"),
        ])
        .unwrap();

        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "aGVsbG8=");
    }

    #[test]
    fn first_inline_data_part_is_chosen() {
        let image = extract_artifact(vec![
            Part::inline("image/png", "first"),
            Part::inline("image/jpeg", "second"),
        ])
        .unwrap();

        assert_eq!(image.data, "first");
    }

    #[test]
    fn part_with_text_and_inline_data_counts_as_artifact() {
        let image = extract_artifact(vec![Part {
            text: Some("rendered your card".to_string()),
            inline_data: Some(InlineData {
                mime_type: "image/png".to_string(),
                data: "Zm9v".to_string(),
            }),
        }])
        .unwrap();

        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "Zm9v");
    }

    #[test]
    fn text_only_becomes_explanation() {
        let err =
            extract_artifact(vec![Part::text("I cannot edit images of people.")]).unwrap_err();

        match err {
            ProviderError::NoImage { explanation } => {
                assert_eq!(explanation.as_deref(), Some("I cannot edit images of people."));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_parts_have_no_explanation() {
        let err = extract_artifact(vec![]).unwrap_err();

        match err {
            ProviderError::NoImage { explanation } => assert!(explanation.is_none()),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_text_parts_are_skipped_as_explanations() {
        let err = extract_artifact(vec![Part::text(""), Part::text("real reason")]).unwrap_err();

        match err {
            ProviderError::NoImage { explanation } => {
                assert_eq!(explanation.as_deref(), Some("real reason"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn inline_data_parts_deserialize_from_api_shape() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "rendered"},
                        {"inlineData": {"mimeType": "image/png", "data": "Zm9v"}}
                    ]
                },
                "finishReason": "STOP"
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let parts = response.candidates.into_iter().next().unwrap().content.parts;
        let image = extract_artifact(parts).unwrap();

        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "Zm9v");
    }

    #[test]
    fn unrecognized_part_shapes_are_skipped() {
        // Responses can interleave part shapes this service does not model;
        // they must not break deserialization or hide a later image part.
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"functionCall": {"name": "render", "args": {}}},
                        {"text": "annotated", "thought": true},
                        {"inlineData": {"mimeType": "image/png", "data": "YmFy"}}
                    ]
                }
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let parts = response.candidates.into_iter().next().unwrap().content.parts;
        let image = extract_artifact(parts).unwrap();

        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "YmFy");
    }

    #[test]
    fn combined_text_and_inline_part_deserializes_to_the_image() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "here you go", "inlineData": {"mimeType": "image/jpeg", "data": "cXV4"}}
                    ]
                }
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let parts = response.candidates.into_iter().next().unwrap().content.parts;
        let image = extract_artifact(parts).unwrap();

        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "cXV4");
    }
}
