//! Diagnostic endpoints: which models the credential can see, and which of a
//! fixed candidate list actually answer a generation call.

use crate::startup::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

/// Model identifiers the probe endpoint tries, in order.
const PROBE_MODELS: &[&str] = &[
    "gemini-pro",
    "gemini-1.5-pro",
    "gemini-1.5-flash",
    "gemini-1.0-pro",
    "models/gemini-pro",
    "models/gemini-1.5-pro",
    "models/gemini-1.5-flash",
];

pub async fn list_models(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let models = state.provider.list_models().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list models");
        AppError::UpstreamError {
            message: "Failed to list models".to_string(),
            details: Some(e.to_string()),
        }
    })?;

    let image_capable: Vec<&str> = models
        .iter()
        .filter(|m| m.supports_image_generation())
        .map(|m| m.name.as_str())
        .collect();

    Ok(Json(json!({
        "success": true,
        "totalModels": models.len(),
        "availableForImageGeneration": image_capable,
        "models": models,
    })))
}

/// Try a trivial generation against each candidate model and report which
/// ones answer. Individual probe failures do not fail the endpoint.
pub async fn probe_models(State(state): State<AppState>) -> Json<Value> {
    let mut results = Vec::with_capacity(PROBE_MODELS.len());
    let mut working = Vec::new();

    for model in PROBE_MODELS {
        match state.provider.probe_model(model).await {
            Ok(reply) => {
                results.push(json!({
                    "model": model,
                    "ok": true,
                    "response": reply,
                }));
                working.push(*model);
            }
            Err(e) => {
                tracing::warn!(model = %model, error = %e, "Model probe failed");
                results.push(json!({
                    "model": model,
                    "ok": false,
                    "error": e.to_string(),
                }));
            }
        }
    }

    let recommendation = working.first().map_or_else(
        || "No working models found. The configured credential may not have access.".to_string(),
        |m| format!("Use this model: {}", m),
    );

    Json(json!({
        "success": true,
        "testResults": results,
        "workingModels": working,
        "recommendation": recommendation,
    }))
}
