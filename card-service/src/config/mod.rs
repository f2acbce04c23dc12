use service_core::config as core_config;
use service_core::config::get_env;
use service_core::error::AppError;

/// Default model for image-to-image generation.
const DEFAULT_IMAGE_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone)]
pub struct CardConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    /// When set, raw upstream error text is included in the `details` field
    /// of error responses. Defaults on outside production.
    pub expose_error_details: bool,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model used for the generate endpoint (e.g., gemini-1.5-flash).
    pub image_model: String,
}

impl CardConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = common_config.is_prod();

        // An empty key is tolerated outside production so the service can
        // start without a credential; the generate handler rejects requests
        // until one is configured.
        let api_key = get_env("GOOGLE_API_KEY", Some(""), is_prod)?;

        let expose_default = if is_prod { "false" } else { "true" };
        let expose_error_details = parse_flag(
            "EXPOSE_ERROR_DETAILS",
            &get_env("EXPOSE_ERROR_DETAILS", Some(expose_default), false)?,
            !is_prod,
        );

        Ok(CardConfig {
            common: common_config,
            google: GoogleConfig { api_key },
            models: ModelConfig {
                image_model: get_env("GENAI_IMAGE_MODEL", Some(DEFAULT_IMAGE_MODEL), is_prod)?,
            },
            expose_error_details,
        })
    }
}

/// Parse a boolean flag, accepting the usual truthy/falsy spellings.
/// Unrecognized values fall back to the default with a warning.
fn parse_flag(key: &str, value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => {
            tracing::warn!(
                key = key,
                value = other,
                default = default,
                "Unrecognized boolean flag value; using default"
            );
            default
        }
    }
}
