//! Prompt Builder System
//!
//! Standardized prompt construction for review requests. Both the per-file
//! and the whole-project prompts are assembled from the same sections so the
//! service sees a consistent structure.

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Role definition with expertise area
    Role { expertise: String, task: String },
    /// Numbered objectives
    Objectives(Vec<String>),
    /// Ordered key-value pairs
    Context(Vec<(String, String)>),
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Code block with language
    Code { language: String, content: String },
    /// Expected JSON response shape, as an example object
    OutputFormat(String),
}

#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, expertise: &str, task: &str) -> Self {
        self.sections.push(PromptSection::Role {
            expertise: expertise.to_string(),
            task: task.to_string(),
        });
        self
    }

    pub fn objectives(mut self, objectives: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Objectives(
            objectives.into_iter().map(String::from).collect(),
        ));
        self
    }

    /// Add a context item, appending to the existing context section if any
    pub fn context_item(mut self, key: &str, value: &str) -> Self {
        let existing = self.sections.iter_mut().find_map(|section| match section {
            PromptSection::Context(items) => Some(items),
            _ => None,
        });

        match existing {
            Some(items) => items.push((key.to_string(), value.to_string())),
            None => self.sections.push(PromptSection::Context(vec![(
                key.to_string(),
                value.to_string(),
            )])),
        }
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    pub fn code(mut self, language: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Code {
            language: language.to_string(),
            content: content.to_string(),
        });
        self
    }

    pub fn output_format(mut self, example: &str) -> Self {
        self.sections
            .push(PromptSection::OutputFormat(example.to_string()));
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role { expertise, task } => {
                    prompt.push_str("<ROLE>\n");
                    prompt.push_str(&format!(
                        "You are an expert {} specializing in {}.\n",
                        expertise, task
                    ));
                    prompt.push_str("</ROLE>\n\n");
                }
                PromptSection::Objectives(objectives) => {
                    prompt.push_str("<OBJECTIVES>\n");
                    for (i, obj) in objectives.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, obj));
                    }
                    prompt.push_str("</OBJECTIVES>\n\n");
                }
                PromptSection::Context(items) => {
                    prompt.push_str("# Context\n\n");
                    for (key, value) in items {
                        prompt.push_str(&format!("**{}**: {}\n", key, value));
                    }
                    prompt.push('\n');
                }
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("# {}\n\n", h));
                    }
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Code { language, content } => {
                    let fence = code_fence_for(&content);
                    prompt.push_str(&format!("{}{}\n", fence, language));
                    prompt.push_str(&content);
                    prompt.push_str(&format!("\n{}\n\n", fence));
                }
                PromptSection::OutputFormat(example) => {
                    prompt.push_str("# Response Format\n\n");
                    prompt.push_str(
                        "Respond ONLY with a JSON object in exactly this format, no other text:\n",
                    );
                    prompt.push_str(&example);
                    prompt.push_str("\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

/// A backtick fence longer than any backtick run inside `content`
fn code_fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut current = 0;
    for ch in content.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    "`".repeat(longest.max(2) + 1)
}

/// Preset prompt templates
pub struct PromptTemplates;

impl PromptTemplates {
    /// Template for a single-file review
    pub fn file_review(file_path: &str, language: &str) -> PromptBuilder {
        PromptBuilder::new()
            .role("code reviewer", "software quality assessment")
            .objectives(vec![
                "Rate the overall code quality from 1 (poor) to 10 (excellent)",
                "Estimate the dominant time complexity using Big-O notation",
                "Briefly explain the rating",
                "Suggest concrete improvements",
            ])
            .context_item("File", file_path)
            .context_item("Language", language)
    }

    /// Template for the whole-project review
    pub fn project_review(project_name: &str) -> PromptBuilder {
        PromptBuilder::new()
            .role("software architect", "project-level quality assessment")
            .objectives(vec![
                "Rate the overall project quality from 1 (poor) to 10 (excellent)",
                "Assess the overall complexity of the codebase",
                "Identify the main strengths of the project",
                "Identify the main weaknesses of the project",
                "Recommend the most valuable next improvements",
            ])
            .context_item("Project", project_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_prompt() {
        let prompt = PromptBuilder::new()
            .role("code reviewer", "quality assessment")
            .objectives(vec!["Rate code", "Suggest fixes"])
            .build();

        assert!(prompt.contains("<ROLE>"));
        assert!(prompt.contains("code reviewer"));
        assert!(prompt.contains("1. Rate code"));
        assert!(prompt.contains("2. Suggest fixes"));
    }

    #[test]
    fn test_context_items_keep_order() {
        let prompt = PromptBuilder::new()
            .context_item("File", "src/main.rs")
            .context_item("Language", "Rust")
            .build();

        let file_pos = prompt.find("**File**: src/main.rs").unwrap();
        let lang_pos = prompt.find("**Language**: Rust").unwrap();
        assert!(file_pos < lang_pos);
    }

    #[test]
    fn test_code_fence_outgrows_embedded_fences() {
        let prompt = PromptBuilder::new()
            .code("markdown", "```rust\nfn main() {}\n```")
            .build();
        assert!(prompt.starts_with("````markdown\n"));
        assert!(prompt.ends_with("\n````"));
    }

    #[test]
    fn test_file_review_template() {
        let prompt = PromptTemplates::file_review("src/lib.rs", "Rust")
            .code("rust", "pub fn add() {}")
            .output_format(r#"{"rating": 7}"#)
            .build();

        assert!(prompt.contains("src/lib.rs"));
        assert!(prompt.contains("```rust\npub fn add() {}\n```"));
        assert!(prompt.contains("Respond ONLY with a JSON object"));
    }
}
