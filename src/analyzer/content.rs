//! Per-file content analysis.
//!
//! One prompt and one request per file. Every outcome, including service
//! and parse failures, is folded into a [`FileAnalysis`].

use tracing::{debug, warn};

use crate::ai::{PromptTemplates, ServiceClient, ServiceReply, parse_json_object};
use crate::analyzer::language::Language;
use crate::constants::parse::{DEFAULT_COMPLEXITY, RAW_PREVIEW_CHARS};
use crate::types::{FileAnalysis, json_rating, json_string_or, json_text_or, preview};

const FILE_RESPONSE_FORMAT: &str = r#"{
  "rating": 7,
  "complexity": "O(n)",
  "explanation": "One or two sentences justifying the rating",
  "suggestions": "Concrete improvements, one per line"
}"#;

pub struct ContentAnalyzer {
    client: ServiceClient,
}

impl ContentAnalyzer {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// Rate one file. Never fails; problems are reported in the explanation.
    pub async fn analyze(&self, relative_path: &str, language: Language, content: &str) -> FileAnalysis {
        let prompt = Self::build_prompt(relative_path, language, content);

        match self.client.request(&prompt).await {
            ServiceReply::Unavailable(reason) => {
                FileAnalysis::failed(format!("AI service not available: {}", reason))
            }
            ServiceReply::Empty => {
                warn!("Empty response for {}", relative_path);
                FileAnalysis::failed("No response from AI service")
            }
            ServiceReply::Failed(e) => {
                FileAnalysis::failed(format!("Error analyzing file: {}", e.message()))
            }
            ServiceReply::Text(text) => Self::parse_response(relative_path, &text),
        }
    }

    fn build_prompt(relative_path: &str, language: Language, content: &str) -> String {
        PromptTemplates::file_review(relative_path, language.as_str())
            .code(language.highlight_str(), content)
            .output_format(FILE_RESPONSE_FORMAT)
            .build()
    }

    /// Lenient parse: any field may be missing or loosely typed.
    fn parse_response(relative_path: &str, text: &str) -> FileAnalysis {
        match parse_json_object(text) {
            Ok(value) => {
                debug!("Parsed analysis for {}", relative_path);
                FileAnalysis {
                    rating: json_rating(&value, "rating").unwrap_or(0),
                    complexity: json_string_or(&value, "complexity", DEFAULT_COMPLEXITY),
                    explanation: json_text_or(&value, "explanation", ""),
                    suggestions: json_text_or(&value, "suggestions", ""),
                }
            }
            Err(e) => {
                warn!("Unparseable response for {}: {}", relative_path, e);
                FileAnalysis::failed(format!(
                    "Failed to parse AI response: {}",
                    preview(text, RAW_PREVIEW_CHARS)
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::client::testing::MockProvider;
    use std::sync::Arc;

    async fn analyze_with(mock: Arc<MockProvider>) -> FileAnalysis {
        let analyzer = ContentAnalyzer::new(ServiceClient::available(mock));
        analyzer.analyze("src/main.rs", Language::Rust, "fn main() {}").await
    }

    #[tokio::test]
    async fn test_fenced_response_is_parsed() {
        let reply = "Here is my review:\n```json\n{\"rating\": 7, \"complexity\": \"O(n)\", \"explanation\": \"ok\", \"suggestions\": \"add docs\"}\n```";
        let analysis = analyze_with(Arc::new(MockProvider::answering(reply))).await;

        assert_eq!(analysis.rating, 7);
        assert_eq!(analysis.complexity, "O(n)");
        assert_eq!(analysis.explanation, "ok");
        assert_eq!(analysis.suggestions, "add docs");
    }

    #[tokio::test]
    async fn test_missing_fields_take_defaults() {
        let analysis = analyze_with(Arc::new(MockProvider::answering(r#"{"explanation": "short"}"#))).await;

        assert_eq!(analysis.rating, 0);
        assert_eq!(analysis.complexity, "O(1)");
        assert_eq!(analysis.explanation, "short");
        assert_eq!(analysis.suggestions, "");
    }

    #[tokio::test]
    async fn test_loose_types_are_normalized() {
        let reply = r#"{"rating": "8.6", "complexity": "O(log n)", "explanation": "", "suggestions": ["a", "b"]}"#;
        let analysis = analyze_with(Arc::new(MockProvider::answering(reply))).await;

        assert_eq!(analysis.rating, 9);
        assert_eq!(analysis.suggestions, "a\nb");

        let analysis =
            analyze_with(Arc::new(MockProvider::answering(r#"{"rating": 42}"#))).await;
        assert_eq!(analysis.rating, 10);
    }

    #[tokio::test]
    async fn test_malformed_response_embeds_preview() {
        let reply = format!("{{\"rating\": 7, {}", "x".repeat(200));
        let analysis = analyze_with(Arc::new(MockProvider::answering(reply.clone()))).await;

        assert_eq!(analysis.rating, 0);
        assert_eq!(analysis.complexity, "N/A");
        let expected = format!("Failed to parse AI response: {}", &reply[..100]);
        assert_eq!(analysis.explanation, expected);
    }

    #[tokio::test]
    async fn test_unavailable_service_yields_placeholder() {
        // `Unavailable` holds no provider, so there is nothing to call
        let analyzer = ContentAnalyzer::new(ServiceClient::unavailable("GEMINI_API_KEY not set"));
        let analysis = analyzer.analyze("a.py", Language::Python, "print(1)\n").await;

        assert_eq!(
            analysis.explanation,
            "AI service not available: GEMINI_API_KEY not set"
        );
        assert_eq!(analysis.rating, 0);
    }

    #[tokio::test]
    async fn test_request_error_is_reported() {
        let mock = Arc::new(MockProvider::answering("{}").then_fail("connection reset"));
        let analysis = analyze_with(mock.clone()).await;

        assert_eq!(analysis.explanation, "Error analyzing file: connection reset");
        assert_eq!(analysis.complexity, "N/A");
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_response() {
        let analysis = analyze_with(Arc::new(MockProvider::answering(""))).await;
        assert_eq!(analysis.explanation, "No response from AI service");
        assert_eq!(analysis.rating, 0);
    }

    #[tokio::test]
    async fn test_prompt_carries_path_language_and_code() {
        let mock = Arc::new(MockProvider::answering("{}"));
        analyze_with(mock.clone()).await;

        let prompt = &mock.prompts()[0];
        assert!(prompt.contains("**File**: src/main.rs"));
        assert!(prompt.contains("**Language**: Rust"));
        assert!(prompt.contains("```rust\nfn main() {}\n```"));
        assert!(prompt.contains("\"suggestions\""));
    }
}
