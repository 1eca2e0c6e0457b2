//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/codegrade/) and project (.codegrade/) level configuration.

use serde::{Deserialize, Serialize};

use crate::ai::ProviderConfig;
use crate::constants::{llm, scan};
use crate::types::{CodeGradeError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Project-specific settings
    pub project: ProjectConfig,

    /// Traversal settings
    pub analysis: AnalysisConfig,

    /// LLM provider settings
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            project: ProjectConfig::default(),
            analysis: AnalysisConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `CodeGradeError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(CodeGradeError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(CodeGradeError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.analysis.ignore_file.trim().is_empty() {
            return Err(CodeGradeError::Config(
                "analysis.ignore_file must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply command-line overrides (highest priority)
    pub fn with_overrides(mut self, provider: Option<String>, model: Option<String>) -> Self {
        if let Some(provider) = provider {
            self.llm.provider = provider;
        }
        if let Some(model) = model {
            self.llm.model = Some(model);
        }
        self
    }
}

// =============================================================================
// Project Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Display name in reports (defaults to directory name)
    pub name: Option<String>,
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Gitignore-syntax file read from the analysis root
    pub ignore_file: String,

    /// Patterns excluded whether or not the ignore file exists
    pub default_excludes: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ignore_file: scan::DEFAULT_IGNORE_FILE.to_string(),
            default_excludes: scan::DEFAULT_EXCLUDES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: gemini, openai, ollama
    pub provider: String,

    /// Model name (provider default when unset)
    pub model: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,

    /// Maximum tokens to generate per request
    pub max_tokens: usize,

    /// Custom API endpoint
    pub api_base: Option<String>,

    /// API key; prefer the provider's environment variable
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: llm::DEFAULT_PROVIDER.to_string(),
            model: None,
            timeout_secs: llm::DEFAULT_TIMEOUT_SECS,
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
            api_base: None,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl LlmConfig {
    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider.clone(),
            model: self.model.clone(),
            timeout_secs: self.timeout_secs,
            temperature: self.temperature,
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            max_tokens: self.max_tokens,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.timeout_secs, 120);
        assert_eq!(config.analysis.ignore_file, ".gitignore");
        assert_eq!(config.analysis.default_excludes, vec![".git/", ".venv/"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.llm.temperature = 2.5;
        assert!(matches!(config.validate(), Err(CodeGradeError::Config(_))));

        let mut config = Config::default();
        config.llm.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analysis.ignore_file = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-secret".to_string());

        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("sk-secret"));
        assert!(!format!("{:?}", config).contains("sk-secret"));
    }

    #[test]
    fn test_overrides_and_provider_config() {
        let config = Config::default()
            .with_overrides(Some("ollama".to_string()), Some("llama3:8b".to_string()));
        let provider = config.llm.to_provider_config();

        assert_eq!(provider.provider, "ollama");
        assert_eq!(provider.model.as_deref(), Some("llama3:8b"));
        assert_eq!(provider.timeout_secs, 120);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[llm]\nprovider = \"openai\"\n").unwrap();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.analysis.ignore_file, ".gitignore");
    }
}
