//! Mock provider implementation for testing.

use super::{GeneratedImage, ImageProvider, ModelInfo, ProviderError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the mock should do when invoked.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return an image artifact.
    Image { mime_type: String, data: String },
    /// Return only a text part: the model declined and explained itself.
    TextOnly(String),
    /// Return a response with no usable parts at all.
    Empty,
    /// Fail the call with an API error.
    Fail { status: u16, message: String },
}

impl MockBehavior {
    pub fn image() -> Self {
        MockBehavior::Image {
            mime_type: "image/png".to_string(),
            data: "bW9jay1pbWFnZS1ieXRlcw==".to_string(),
        }
    }
}

/// Arguments the mock saw on its most recent transform call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub instruction: String,
    pub mime_type: String,
}

/// Mock image provider for testing.
///
/// Counts invocations so tests can assert that validation failures never
/// reach the provider.
pub struct MockImageProvider {
    behavior: MockBehavior,
    calls: AtomicUsize,
    last_call: Mutex<Option<RecordedCall>>,
}

impl MockImageProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    /// Number of transform invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Arguments of the most recent transform invocation.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.last_call.lock().unwrap().clone()
    }

    fn fail_if_configured(&self) -> Result<(), ProviderError> {
        if let MockBehavior::Fail { status, message } = &self.behavior {
            return Err(ProviderError::ApiError {
                status: *status,
                message: message.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn transform(
        &self,
        instruction: &str,
        _image_base64: &str,
        mime_type: &str,
    ) -> Result<GeneratedImage, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some(RecordedCall {
            instruction: instruction.to_string(),
            mime_type: mime_type.to_string(),
        });

        match &self.behavior {
            MockBehavior::Image { mime_type, data } => Ok(GeneratedImage {
                mime_type: mime_type.clone(),
                data: data.clone(),
            }),
            MockBehavior::TextOnly(text) => Err(ProviderError::NoImage {
                explanation: Some(text.clone()),
            }),
            MockBehavior::Empty => Err(ProviderError::NoImage { explanation: None }),
            MockBehavior::Fail { status, message } => Err(ProviderError::ApiError {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        self.fail_if_configured()?;

        Ok(vec![
            ModelInfo {
                name: "models/mock-image-model".to_string(),
                display_name: Some("Mock Image Model".to_string()),
                description: Some("Mock model for image generation".to_string()),
                supported_methods: vec!["generateContent".to_string()],
                input_token_limit: Some(1_048_576),
                output_token_limit: Some(8_192),
            },
            ModelInfo {
                name: "models/mock-embedding-model".to_string(),
                display_name: Some("Mock Embedding Model".to_string()),
                description: Some("Mock model for embeddings".to_string()),
                supported_methods: vec!["embedContent".to_string()],
                input_token_limit: Some(2_048),
                output_token_limit: None,
            },
        ])
    }

    async fn probe_model(&self, _model: &str) -> Result<String, ProviderError> {
        self.fail_if_configured()?;
        Ok("hello".to_string())
    }
}
