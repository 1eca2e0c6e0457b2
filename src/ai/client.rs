//! Service Client
//!
//! Wraps the configured provider in an explicit availability state. A
//! provider that could not be constructed becomes `ServiceClient::Unavailable`
//! and every request short-circuits without touching the network.

use tracing::{debug, warn};

use super::provider::{ProviderConfig, SharedProvider, create_provider};
use crate::types::CodeGradeError;

/// Text-generation service handle, constructed once per process
#[derive(Clone)]
pub enum ServiceClient {
    Available(SharedProvider),
    Unavailable { reason: String },
}

/// Outcome of one request, before any parsing
#[derive(Debug)]
pub enum ServiceReply {
    /// The client is unavailable; no request was issued
    Unavailable(String),
    /// The service answered without any text
    Empty,
    Text(String),
    /// Transport or service error
    Failed(CodeGradeError),
}

impl ServiceClient {
    /// Build the client from provider configuration.
    ///
    /// Construction errors (missing API key, bad endpoint, unknown provider)
    /// are logged once and yield the unavailable variant.
    pub fn from_config(config: &ProviderConfig) -> Self {
        match create_provider(config) {
            Ok(provider) => {
                debug!(
                    "AI service ready (provider: {}, model: {})",
                    provider.name(),
                    provider.model()
                );
                Self::Available(provider)
            }
            Err(e) => {
                warn!("AI service initialization failed: {}", e);
                Self::Unavailable {
                    reason: e.message(),
                }
            }
        }
    }

    pub fn available(provider: SharedProvider) -> Self {
        Self::Available(provider)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Short description for logs and report headers
    pub fn describe(&self) -> String {
        match self {
            Self::Available(provider) => format!("{} ({})", provider.name(), provider.model()),
            Self::Unavailable { .. } => "unavailable".to_string(),
        }
    }

    /// Issue exactly one request and classify the outcome.
    pub async fn request(&self, prompt: &str) -> ServiceReply {
        let provider = match self {
            Self::Available(provider) => provider,
            Self::Unavailable { reason } => return ServiceReply::Unavailable(reason.clone()),
        };

        match provider.generate(prompt).await {
            Ok(response) if response.has_text() => {
                debug!(
                    "{} replied in {}ms ({} tokens)",
                    provider.name(),
                    response.timing.total_ms,
                    response.usage.total()
                );
                ServiceReply::Text(response.text)
            }
            Ok(_) => ServiceReply::Empty,
            Err(e) => {
                warn!("{} request failed: {}", provider.name(), e);
                ServiceReply::Failed(e)
            }
        }
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(provider) => f
                .debug_struct("Available")
                .field("provider", &provider.name())
                .field("model", &provider.model())
                .finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted provider for analyzer and pipeline tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::ai::provider::{LlmProvider, LlmResponse};
    use crate::types::{CodeGradeError, Result};

    /// Replays queued replies in order, then falls back to `default_reply`.
    pub struct MockProvider {
        replies: Mutex<VecDeque<Result<String>>>,
        default_reply: String,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl MockProvider {
        pub fn answering(default_reply: impl Into<String>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::new()),
                default_reply: default_reply.into(),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn then_reply(self, reply: impl Into<String>) -> Self {
            self.replies.lock().unwrap().push_back(Ok(reply.into()));
            self
        }

        pub fn then_fail(self, message: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(CodeGradeError::LlmApi(message.to_string())));
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for MockProvider {
        async fn generate(&self, prompt: &str) -> Result<LlmResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());

            let next = self.replies.lock().unwrap().pop_front();
            match next {
                Some(Ok(text)) => Ok(LlmResponse::text_only(text)),
                Some(Err(e)) => Err(e),
                None => Ok(LlmResponse::text_only(self.default_reply.clone())),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockProvider;
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unavailable_short_circuits() {
        let client = ServiceClient::unavailable("no API key");
        match client.request("prompt").await {
            ServiceReply::Unavailable(reason) => assert_eq!(reason, "no API key"),
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_whitespace_reply_is_empty() {
        let mock = Arc::new(MockProvider::answering("   \n"));
        let client = ServiceClient::available(mock.clone());
        assert!(matches!(client.request("prompt").await, ServiceReply::Empty));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_error_reply_is_failed() {
        let mock = Arc::new(MockProvider::answering("{}").then_fail("connection refused"));
        let client = ServiceClient::available(mock);
        match client.request("prompt").await {
            ServiceReply::Failed(e) => assert_eq!(e.message(), "connection refused"),
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_from_config_unknown_provider_is_unavailable() {
        let config = ProviderConfig {
            provider: "nope".to_string(),
            ..Default::default()
        };
        let client = ServiceClient::from_config(&config);
        assert!(!client.is_available());
        assert_eq!(client.describe(), "unavailable");
    }
}
