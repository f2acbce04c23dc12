//! The generate endpoint: validate, map style to prompt, invoke the
//! provider, relay the artifact or a classified error.

use crate::models::styles;
use crate::models::{GenerateRequest, GenerateResponse, ImageArtifact};
use crate::services::classify::classify_provider_error;
use crate::services::providers::ProviderError;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

/// MIME type assumed when the client does not send one.
const DEFAULT_MIME_TYPE: &str = "image/jpeg";

pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if req.validate().is_err() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Missing required fields: imageBase64 and background"
        )));
    }

    let Some(instruction) = styles::instruction_for(&req.background) else {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Invalid background selection"
        )));
    };

    // Fatal server-side condition, checked before any remote call.
    if state.config.google.api_key.is_empty() {
        tracing::error!("GOOGLE_API_KEY not set; rejecting generation request");
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "GOOGLE_API_KEY is not set"
        )));
    }

    let mime_type = req.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE);

    match state
        .provider
        .transform(instruction, &req.image_base64, mime_type)
        .await
    {
        Ok(image) => {
            tracing::info!(
                background = %req.background,
                artifact_mime_type = %image.mime_type,
                "Generated card image"
            );
            Ok(Json(GenerateResponse {
                success: true,
                image: ImageArtifact {
                    mime_type: image.mime_type,
                    data: image.data,
                },
            }))
        }
        Err(ProviderError::NoImage { explanation }) => {
            let reason = explanation.unwrap_or_else(|| "No image returned from AI".to_string());
            tracing::error!(background = %req.background, reason = %reason, "Model produced no image");
            Err(AppError::UpstreamError {
                message: format!("AI generation failed: {}", reason),
                details: None,
            })
        }
        Err(err) => {
            tracing::error!(background = %req.background, error = %err, "Image generation failed");
            let classified = classify_provider_error(&err);
            Err(AppError::UpstreamError {
                message: classified.safe_message.to_string(),
                details: state
                    .config
                    .expose_error_details
                    .then(|| err.to_string()),
            })
        }
    }
}
