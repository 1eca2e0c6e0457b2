//! Report Rendering
//!
//! Turns an [`AnalysisRun`](crate::analyzer::AnalysisRun) into a text or
//! JSON report, written line by line into a [`ReportSink`].

pub mod buckets;
pub mod renderer;
pub mod sink;

use std::fmt;
use std::str::FromStr;

pub use buckets::{QualityBucket, bucket_entry, files_in_bucket};
pub use renderer::{format_elapsed, render_json, render_text};
pub use sink::{ConsoleSink, FileSink, LineKind, ReportSink};

use crate::analyzer::AnalysisRun;
use crate::types::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format '{}'. Valid values: text, json", s)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

pub fn render(run: &AnalysisRun, format: ReportFormat, sink: &mut dyn ReportSink) -> Result<()> {
    match format {
        ReportFormat::Text => render_text(run, sink),
        ReportFormat::Json => render_json(run, sink),
    }
}
