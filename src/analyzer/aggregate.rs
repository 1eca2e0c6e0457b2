//! Whole-project aggregation.
//!
//! Summarizes the completed [`ProjectInfo`] into one prompt and parses the
//! reply strictly: all five [`ProjectAnalysis`] fields must be present.

use tracing::{info, warn};

use crate::ai::{PromptTemplates, ServiceClient, ServiceReply, parse_json_object};
use crate::constants::parse::RAW_PREVIEW_CHARS;
use crate::types::{CodeGradeError, ProjectAnalysis, ProjectInfo, Result, preview};

const NO_ANALYSIS: &str = "No analysis available";

const PROJECT_RESPONSE_FORMAT: &str = r#"{
  "overall_rating": 7,
  "complexity_assessment": "Overall complexity of the codebase",
  "project_strengths": "Main strengths",
  "project_weaknesses": "Main weaknesses",
  "recommendations": "Most valuable next improvements"
}"#;

pub struct ProjectAggregator<'a> {
    client: &'a ServiceClient,
}

impl<'a> ProjectAggregator<'a> {
    pub fn new(client: &'a ServiceClient) -> Self {
        Self { client }
    }

    pub async fn aggregate(&self, project: &ProjectInfo) -> ProjectAnalysis {
        info!(
            "Requesting project assessment ({} files summarized)",
            project.files().len()
        );
        let prompt = build_prompt(project);

        match self.client.request(&prompt).await {
            ServiceReply::Unavailable(reason) => {
                ProjectAnalysis::failed(format!("AI service not available: {}", reason))
            }
            ServiceReply::Empty => {
                warn!("Empty response for project assessment");
                ProjectAnalysis::failed("No response from AI service")
            }
            ServiceReply::Failed(e) => {
                ProjectAnalysis::failed(format!("Error analyzing project: {}", e.message()))
            }
            ServiceReply::Text(text) => match parse_project_analysis(&text) {
                Ok(analysis) => analysis,
                Err(e) => {
                    warn!("Unparseable project assessment: {}", e);
                    ProjectAnalysis::failed(format!(
                        "Failed to parse AI response: {}",
                        preview(&text, RAW_PREVIEW_CHARS)
                    ))
                }
            },
        }
    }
}

/// Languages ordered by file count, most common first.
pub fn languages_by_count(project: &ProjectInfo) -> Vec<(&str, usize)> {
    let mut languages: Vec<(&str, usize)> = project
        .languages()
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    languages
}

fn build_prompt(project: &ProjectInfo) -> String {
    let languages = languages_by_count(project)
        .into_iter()
        .map(|(name, count)| format!("- {}: {}", name, count))
        .collect::<Vec<_>>()
        .join("\n");

    let summaries = project
        .files()
        .iter()
        .map(|path| {
            let explanation = project
                .analysis(path)
                .map(|a| a.explanation.as_str())
                .unwrap_or(NO_ANALYSIS);
            format!("{}: {}", path, explanation)
        })
        .collect::<Vec<_>>()
        .join("\n");

    PromptTemplates::project_review(project.name())
        .context_item("Total files", &project.file_count().to_string())
        .context_item("Total lines", &project.total_lines().to_string())
        .section("Languages", &languages)
        .section("File Summaries", &summaries)
        .output_format(PROJECT_RESPONSE_FORMAT)
        .build()
}

fn parse_project_analysis(text: &str) -> Result<ProjectAnalysis> {
    let value = parse_json_object(text)?;
    serde_json::from_value(value).map_err(|e| CodeGradeError::Parse {
        message: e.to_string(),
        path: "project_analysis".to_string(),
    })
}
