//! Analysis result types
//!
//! Verdicts returned by the text-generation service, one per file and one
//! per project, plus the placeholder values used when a verdict could not be
//! obtained.

use serde::{Deserialize, Serialize};

use super::utils::deserialize_rating;

/// Label used for complexity when no verdict is available
pub const NOT_AVAILABLE: &str = "N/A";

/// Per-file quality and complexity verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// Quality rating, 1-10 from the service, 0 when analysis failed
    pub rating: u8,
    /// Big-O style complexity label
    pub complexity: String,
    pub explanation: String,
    pub suggestions: String,
}

impl FileAnalysis {
    /// Placeholder verdict carrying an explanation of what went wrong
    pub fn failed(explanation: impl Into<String>) -> Self {
        Self {
            rating: 0,
            complexity: NOT_AVAILABLE.to_string(),
            explanation: explanation.into(),
            suggestions: String::new(),
        }
    }

    /// Verdict recorded when a file could not be read or analyzed
    pub fn processing_error() -> Self {
        Self::failed("Error processing file")
    }
}

/// Whole-project verdict from the aggregate request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    #[serde(deserialize_with = "deserialize_rating")]
    pub overall_rating: u8,
    pub complexity_assessment: String,
    pub project_strengths: String,
    pub project_weaknesses: String,
    pub recommendations: String,
}

impl ProjectAnalysis {
    /// Placeholder verdict; the message lands in the strengths field
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            overall_rating: 0,
            complexity_assessment: NOT_AVAILABLE.to_string(),
            project_strengths: message.into(),
            project_weaknesses: NOT_AVAILABLE.to_string(),
            recommendations: NOT_AVAILABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_processing_error_defaults() {
        let analysis = FileAnalysis::processing_error();
        assert_eq!(analysis.rating, 0);
        assert_eq!(analysis.complexity, "N/A");
        assert_eq!(analysis.explanation, "Error processing file");
        assert!(analysis.suggestions.is_empty());
    }

    #[test]
    fn test_project_analysis_requires_all_fields() {
        let complete = json!({
            "overall_rating": 7,
            "complexity_assessment": "Moderate",
            "project_strengths": "Clear layout",
            "project_weaknesses": "Few tests",
            "recommendations": "Add CI"
        });
        let parsed: ProjectAnalysis = serde_json::from_value(complete).unwrap();
        assert_eq!(parsed.overall_rating, 7);

        let partial = json!({"overall_rating": 7, "complexity_assessment": "Moderate"});
        assert!(serde_json::from_value::<ProjectAnalysis>(partial).is_err());
    }

    #[test]
    fn test_project_analysis_lenient_rating() {
        let value = json!({
            "overall_rating": "8.4",
            "complexity_assessment": "",
            "project_strengths": "",
            "project_weaknesses": "",
            "recommendations": ""
        });
        let parsed: ProjectAnalysis = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.overall_rating, 8);
    }

    #[test]
    fn test_project_failed_places_message_in_strengths() {
        let analysis = ProjectAnalysis::failed("AI service not available");
        assert_eq!(analysis.overall_rating, 0);
        assert_eq!(analysis.project_strengths, "AI service not available");
        assert_eq!(analysis.recommendations, "N/A");
    }
}
