//! Code Analyzer Module
//!
//! Filesystem traversal, per-file review requests and the project-level
//! assessment:
//! - Ignore-pattern filtering and iterative tree walking
//! - Extension-based language classification
//! - The pipeline that ties one run together

pub mod aggregate;
pub mod content;
pub mod language;
pub mod pipeline;
pub mod scanner;

pub use aggregate::{ProjectAggregator, languages_by_count};
pub use content::ContentAnalyzer;
pub use language::Language;
pub use pipeline::{AnalysisPipeline, AnalysisRun};
pub use scanner::{IgnoreFilter, TreeWalker};
