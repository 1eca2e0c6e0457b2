//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/codegrade/config.toml)
//! 3. Project config (<root>/.codegrade/config.toml)
//! 4. Environment variables (CODEGRADE_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::scan::PROJECT_CONFIG_DIR;
use crate::types::{CodeGradeError, Result};

const APP_DIR: &str = "codegrade";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "CODEGRADE_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project root:
    /// defaults → global → project → env vars
    pub fn load(root: &Path) -> Result<Config> {
        Self::figment(Self::global_config_path(), root)
            .extract::<Config>()
            .map_err(|e| CodeGradeError::Config(format!("Configuration error: {}", e)))
            .and_then(|config| {
                config.validate()?;
                Ok(config)
            })
    }

    fn figment(global_path: Option<PathBuf>, root: &Path) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global_path
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path(root);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).map(|key| env_key_path(key.as_str()).into()))
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Global config directory: $XDG_CONFIG_HOME/codegrade, else the
    /// platform config directory
    pub fn global_dir() -> Option<PathBuf> {
        env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| directories::BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
            .map(|p| p.join(APP_DIR))
    }

    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    pub fn project_dir(root: &Path) -> PathBuf {
        root.join(PROJECT_CONFIG_DIR)
    }

    pub fn project_config_path(root: &Path) -> PathBuf {
        Self::project_dir(root).join(CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Describe config file locations and whether they exist
    pub fn describe_paths(root: &Path) -> Vec<(&'static str, Option<PathBuf>, bool)> {
        let global = Self::global_config_path();
        let global_exists = global.as_ref().is_some_and(|p| p.exists());
        let project = Self::project_config_path(root);
        let project_exists = project.exists();

        vec![
            ("Global", global, global_exists),
            ("Project", Some(project), project_exists),
        ]
    }

    /// Render the effective configuration in the requested format
    pub fn render(config: &Config, format: &str) -> Result<String> {
        match format {
            "json" => Ok(serde_json::to_string_pretty(config)?),
            "yaml" => Ok(serde_yaml::to_string(config)?),
            "text" | "toml" => {
                toml::to_string_pretty(config).map_err(|e| CodeGradeError::Config(e.to_string()))
            }
            other => Err(CodeGradeError::Config(format!(
                "Unknown format '{}'. Valid values: text, json, yaml",
                other
            ))),
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the commented project config template; returns the file path
    pub fn init_project(root: &Path, name: Option<&str>, force: bool) -> Result<PathBuf> {
        let config_path = Self::project_config_path(root);
        if config_path.exists() && !force {
            return Err(CodeGradeError::Config(format!(
                "Config already exists: {} (use --force to overwrite)",
                config_path.display()
            )));
        }

        fs::create_dir_all(Self::project_dir(root))?;
        fs::write(&config_path, Self::default_project_config(name))?;
        info!("Created project config: {}", config_path.display());

        Ok(config_path)
    }

    /// Generate default project config content (TOML)
    fn default_project_config(name: Option<&str>) -> String {
        let name_line = match name {
            Some(name) => format!("name = {:?}", name),
            None => "# name = \"my-project\"".to_string(),
        };
        format!(
            r#"# codegrade project configuration
# Overrides ~/.config/codegrade/config.toml; CODEGRADE_* environment
# variables override both (e.g. CODEGRADE_LLM_MODEL).

version = "1.0"

[project]
# Display name in reports (defaults to the directory name)
{}

[analysis]
# Gitignore-syntax file read from the project root
ignore_file = ".gitignore"
# Always excluded, whether or not the ignore file exists
default_excludes = [".git/", ".venv/"]

[llm]
# gemini | openai | ollama
provider = "gemini"
# model = "gemini-2.0-flash"
timeout_secs = 120
temperature = 0.2
max_tokens = 2048
# api_base = "http://localhost:11434"
# API keys are read from GEMINI_API_KEY / OPENAI_API_KEY
"#,
            name_line
        )
    }
}

/// Prefix-stripped env key to a config path, split at the first underscore:
/// `llm_timeout_secs` -> `llm.timeout_secs` (figment lowercases env keys)
fn env_key_path(key: &str) -> String {
    key.replacen('_', ".", 1)
}
