//! Analysis Pipeline
//!
//! One run: ignore filter, tree walk with per-file analysis, then the
//! project-level assessment. The elapsed time covers the walk and the
//! per-file requests.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::info;
use uuid::Uuid;

use super::aggregate::ProjectAggregator;
use super::content::ContentAnalyzer;
use super::scanner::{IgnoreFilter, TreeWalker};
use crate::ai::ServiceClient;
use crate::config::Config;
use crate::types::{CodeGradeError, ProjectAnalysis, ProjectInfo, Result};

/// Output of a single pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRun {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    pub project_info: ProjectInfo,
    pub project_analysis: ProjectAnalysis,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

pub struct AnalysisPipeline {
    analyzer: ContentAnalyzer,
    project_name: Option<String>,
    ignore_file: String,
    default_excludes: Vec<String>,
}

impl AnalysisPipeline {
    pub fn new(config: &Config, client: ServiceClient) -> Self {
        Self {
            analyzer: ContentAnalyzer::new(client),
            project_name: config.project.name.clone(),
            ignore_file: config.analysis.ignore_file.clone(),
            default_excludes: config.analysis.default_excludes.clone(),
        }
    }

    pub fn client(&self) -> &ServiceClient {
        self.analyzer.client()
    }

    pub async fn run(&self, root: &Path) -> Result<AnalysisRun> {
        let root = resolve_root(root).await?;
        let name = self
            .project_name
            .clone()
            .unwrap_or_else(|| directory_name(&root));

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("Starting analysis of {} (run {})", root.display(), run_id);

        let filter = IgnoreFilter::load(&root, &self.ignore_file, &self.default_excludes);
        let mut project_info = ProjectInfo::new(&root, name);

        let timer = Instant::now();
        TreeWalker::new(&root, &filter, &self.analyzer)
            .walk(&mut project_info)
            .await;
        let elapsed = timer.elapsed();

        info!(
            "Analyzed {} files in {} directories ({:.1}s)",
            project_info.file_count(),
            project_info.directory_count(),
            elapsed.as_secs_f64()
        );

        let project_analysis = ProjectAggregator::new(self.analyzer.client())
            .aggregate(&project_info)
            .await;

        Ok(AnalysisRun {
            run_id,
            started_at,
            elapsed,
            project_info,
            project_analysis,
        })
    }
}

/// Canonical root, or `NoWorkspace` when it is missing or not a directory.
async fn resolve_root(root: &Path) -> Result<PathBuf> {
    let canonical = tokio::fs::canonicalize(root)
        .await
        .map_err(|_| CodeGradeError::NoWorkspace(root.to_path_buf()))?;

    match tokio::fs::metadata(&canonical).await {
        Ok(meta) if meta.is_dir() => Ok(canonical),
        _ => Err(CodeGradeError::NoWorkspace(root.to_path_buf())),
    }
}

fn directory_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
