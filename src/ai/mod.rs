//! AI Integration Layer
//!
//! Text-generation providers, the availability-aware service client, prompt
//! construction and response parsing.

pub mod client;
pub mod prompt;
pub mod provider;
pub mod validation;

pub use client::{ServiceClient, ServiceReply};
pub use prompt::{PromptBuilder, PromptSection, PromptTemplates};
pub use provider::{
    GeminiProvider, LlmProvider, LlmResponse, OllamaProvider, OpenAiProvider, ProviderConfig,
    ResponseMetadata, ResponseTiming, SharedProvider, TokenUsage, create_provider,
};
pub use validation::{extract_json_object, parse_json_object};
