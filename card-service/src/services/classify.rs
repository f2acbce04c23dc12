//! Remote failure classification.
//!
//! Buckets raw provider errors into a fixed set of categories, each with a
//! user-safe message. The raw error text never reaches the client through
//! this path; handlers log it and may attach it as `details` when the
//! expose-error-details flag is on.

use crate::services::providers::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    InvalidCredential,
    PermissionDenied,
    QuotaExceeded,
    ModelUnavailable,
    Unknown,
}

/// A classified failure: the bucket plus its fixed client-facing message.
#[derive(Debug, Clone, Copy)]
pub struct ClassifiedFailure {
    pub category: FailureCategory,
    pub safe_message: &'static str,
}

type Predicate = fn(status: Option<u16>, message: &str) -> bool;

/// Ordered rule table, first match wins. Credential checks come before
/// permission checks before quota checks before availability checks.
const RULES: &[(Predicate, FailureCategory, &str)] = &[
    (
        |_, message| message.contains("API_KEY_INVALID"),
        FailureCategory::InvalidCredential,
        "API key is invalid. Please check your configuration.",
    ),
    (
        |_, message| message.contains("PERMISSION_DENIED"),
        FailureCategory::PermissionDenied,
        "API permission denied. Please enable the Gemini API in Google Cloud Console.",
    ),
    (
        |_, message| message.contains("QUOTA_EXCEEDED"),
        FailureCategory::QuotaExceeded,
        "API quota exceeded. Please check your Google Cloud Console.",
    ),
    (
        |status, message| status == Some(404) || message.contains("NOT_FOUND"),
        FailureCategory::ModelUnavailable,
        "AI model not available. Please contact support.",
    ),
];

const FALLBACK_MESSAGE: &str = "Failed to generate image. Please try again.";

/// Classify a raw upstream status/message pair.
pub fn classify(status: Option<u16>, message: &str) -> ClassifiedFailure {
    for &(predicate, category, safe_message) in RULES {
        if predicate(status, message) {
            return ClassifiedFailure {
                category,
                safe_message,
            };
        }
    }

    ClassifiedFailure {
        category: FailureCategory::Unknown,
        safe_message: FALLBACK_MESSAGE,
    }
}

/// Classify a provider error.
pub fn classify_provider_error(err: &ProviderError) -> ClassifiedFailure {
    match err {
        ProviderError::ApiError { status, message } => classify(Some(*status), message),
        other => classify(None, &other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_substring_maps_to_its_bucket() {
        let cases = [
            ("API_KEY_INVALID: bad key", FailureCategory::InvalidCredential),
            ("PERMISSION_DENIED for project", FailureCategory::PermissionDenied),
            ("QUOTA_EXCEEDED on requests/min", FailureCategory::QuotaExceeded),
            ("model NOT_FOUND", FailureCategory::ModelUnavailable),
            ("connection reset by peer", FailureCategory::Unknown),
        ];

        for (message, expected) in cases {
            assert_eq!(classify(None, message).category, expected, "{}", message);
        }
    }

    #[test]
    fn http_404_means_model_unavailable() {
        let classified = classify(Some(404), "requested entity was not found");
        assert_eq!(classified.category, FailureCategory::ModelUnavailable);
        assert_eq!(
            classified.safe_message,
            "AI model not available. Please contact support."
        );
    }

    #[test]
    fn credential_rule_beats_quota_rule() {
        // Precedence: when a message matches several rules, the earlier
        // rule wins.
        let classified = classify(None, "API_KEY_INVALID and QUOTA_EXCEEDED");
        assert_eq!(classified.category, FailureCategory::InvalidCredential);
    }

    #[test]
    fn safe_message_never_echoes_raw_text() {
        let raw = "QUOTA_EXCEEDED: project 12345 exceeded generate_requests_per_minute";
        let classified = classify(Some(429), raw);
        assert_eq!(classified.category, FailureCategory::QuotaExceeded);
        assert!(!classified.safe_message.contains("12345"));
    }

    #[test]
    fn provider_errors_without_status_still_classify() {
        let err = ProviderError::NetworkError("dns failure".to_string());
        assert_eq!(
            classify_provider_error(&err).category,
            FailureCategory::Unknown
        );
    }
}
