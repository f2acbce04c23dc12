use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

/// How many leading characters of the credential are safe to echo.
const KEY_PREFIX_LEN: usize = 6;

/// Reports whether the credential is configured, exposing only a short
/// non-secret prefix. Never calls the remote service.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let api_key = &state.config.google.api_key;
    let configured = !api_key.is_empty();
    let key_prefix = if configured {
        format!("{}...", api_key.chars().take(KEY_PREFIX_LEN).collect::<String>())
    } else {
        "NOT SET".to_string()
    };

    Json(json!({
        "status": "ok",
        "service": "card-service",
        "version": env!("CARGO_PKG_VERSION"),
        "credential": {
            "configured": configured,
            "prefix": key_prefix,
        }
    }))
}
