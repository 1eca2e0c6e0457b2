//! codegrade - AI-Assisted Code Quality Reports
//!
//! Walks a project tree, asks a text-generation service to rate every file,
//! then asks for a whole-project assessment and renders a report.
//!
//! ## Pipeline
//!
//! 1. **Ignore filter**: gitignore-style patterns from the project root plus
//!    default exclusions
//! 2. **Tree walk**: iterative, sequential; one review request per file
//! 3. **Aggregation**: one request summarizing every file verdict
//! 4. **Report**: quality buckets, statistics and per-file details as text
//!    or JSON
//!
//! ## Quick Start
//!
//! ```ignore
//! use codegrade::{AnalysisPipeline, Config, ServiceClient};
//! use codegrade::report::{render_text, ConsoleSink};
//!
//! let config = Config::default();
//! let client = ServiceClient::from_config(&config.llm.to_provider_config());
//! let run = AnalysisPipeline::new(&config, client).run(&project_path).await?;
//! render_text(&run, &mut ConsoleSink::new(true))?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: LLM providers, the service client, prompts and response parsing
//! - [`analyzer`]: ignore filter, tree walker, per-file and project analysis
//! - [`report`]: text and JSON rendering
//! - [`config`]: layered configuration

pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod report;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader};

pub use types::{
    CodeGradeError, ErrorCategory, FileAnalysis, ProjectAnalysis, ProjectInfo, Result,
};

pub use ai::{LlmProvider, LlmResponse, ServiceClient, ServiceReply};

pub use analyzer::{AnalysisPipeline, AnalysisRun, IgnoreFilter, Language};

pub use report::{QualityBucket, ReportFormat, ReportSink};
