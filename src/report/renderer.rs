//! Text and JSON report rendering.

use std::time::Duration;

use serde::Serialize;

use super::buckets::{QualityBucket, bucket_entry, files_in_bucket};
use super::sink::{LineKind, ReportSink};
use crate::analyzer::{AnalysisRun, languages_by_count};
use crate::types::{FileAnalysis, Result};

const INDENT: &str = "  ";

/// Render the human-readable report
pub fn render_text(run: &AnalysisRun, sink: &mut dyn ReportSink) -> Result<()> {
    let info = &run.project_info;
    let analysis = &run.project_analysis;

    sink.emit(
        LineKind::Title,
        &format!("Code Quality Report: {}", info.name()),
    )?;
    sink.line(&format!(
        "Generated: {}",
        run.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ))?;
    sink.line(&format!("Elapsed: {}", format_elapsed(run.elapsed)))?;
    sink.line(&format!("Run ID: {}", run.run_id))?;

    section(sink, "Project Statistics")?;
    sink.line(&format!("{INDENT}Files: {}", info.file_count()))?;
    sink.line(&format!("{INDENT}Directories: {}", info.directory_count()))?;
    sink.line(&format!("{INDENT}Lines of code: {}", info.total_lines()))?;

    section(sink, "Languages")?;
    let languages = languages_by_count(info);
    if languages.is_empty() {
        sink.line(&format!("{INDENT}(none)"))?;
    }
    for (name, count) in languages {
        sink.line(&format!("{INDENT}{}: {}", name, count))?;
    }

    section(sink, "Overall Assessment")?;
    sink.line(&format!("{INDENT}Rating: {}/10", analysis.overall_rating))?;
    labeled(sink, "Complexity", &analysis.complexity_assessment)?;
    labeled(sink, "Strengths", &analysis.project_strengths)?;
    labeled(sink, "Weaknesses", &analysis.project_weaknesses)?;
    labeled(sink, "Recommendations", &analysis.recommendations)?;

    for bucket in QualityBucket::ALL {
        section(sink, bucket.title())?;
        let files = files_in_bucket(info, bucket);
        if files.is_empty() {
            sink.line(&format!("{INDENT}(none)"))?;
        }
        for (path, file_analysis) in files {
            sink.line(&format!("{INDENT}{}", bucket_entry(path, file_analysis)))?;
        }
    }

    section(sink, "File Details")?;
    for (path, file_analysis) in info.ratings() {
        file_details(sink, path, file_analysis)?;
    }

    Ok(())
}

fn section(sink: &mut dyn ReportSink, title: &str) -> Result<()> {
    sink.blank()?;
    sink.emit(LineKind::Section, title)
}

/// `label: text`, with continuation lines indented under the label
fn labeled(sink: &mut dyn ReportSink, label: &str, text: &str) -> Result<()> {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or("");
    sink.line(&format!("{INDENT}{}: {}", label, first))?;
    for line in lines {
        sink.line(&format!("{INDENT}{INDENT}{}", line))?;
    }
    Ok(())
}

fn file_details(sink: &mut dyn ReportSink, path: &str, analysis: &FileAnalysis) -> Result<()> {
    sink.line(&format!("{INDENT}{}", path))?;
    sink.line(&format!("{INDENT}{INDENT}Rating: {}/10", analysis.rating))?;
    sink.line(&format!("{INDENT}{INDENT}Complexity: {}", analysis.complexity))?;
    if !analysis.explanation.is_empty() {
        sink.line(&format!("{INDENT}{INDENT}Explanation: {}", analysis.explanation))?;
    }
    if !analysis.suggestions.trim().is_empty() {
        sink.line(&format!("{INDENT}{INDENT}Suggestions:"))?;
        for suggestion in analysis.suggestions.lines().filter(|l| !l.trim().is_empty()) {
            sink.line(&format!("{INDENT}{INDENT}{INDENT}{}", suggestion.trim()))?;
        }
    }
    Ok(())
}

/// `12.34s` under a minute, `3m 07s` above
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

// =============================================================================
// JSON
// =============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    run: &'a AnalysisRun,
    file_analyses: Vec<JsonFileEntry<'a>>,
    buckets: JsonBuckets<'a>,
}

#[derive(Serialize)]
struct JsonFileEntry<'a> {
    path: &'a str,
    bucket: QualityBucket,
    #[serde(flatten)]
    analysis: &'a FileAnalysis,
}

#[derive(Serialize)]
struct JsonBuckets<'a> {
    high: Vec<&'a str>,
    medium: Vec<&'a str>,
    low: Vec<&'a str>,
}

/// Render the run as pretty-printed JSON
pub fn render_json(run: &AnalysisRun, sink: &mut dyn ReportSink) -> Result<()> {
    let info = &run.project_info;
    let paths = |bucket| {
        files_in_bucket(info, bucket)
            .into_iter()
            .map(|(path, _)| path)
            .collect::<Vec<_>>()
    };

    let report = JsonReport {
        run,
        file_analyses: info
            .ratings()
            .map(|(path, analysis)| JsonFileEntry {
                path,
                bucket: QualityBucket::from_rating(analysis.rating),
                analysis,
            })
            .collect(),
        buckets: JsonBuckets {
            high: paths(QualityBucket::High),
            medium: paths(QualityBucket::Medium),
            low: paths(QualityBucket::Low),
        },
    };

    let rendered = serde_json::to_string_pretty(&report)?;
    for line in rendered.lines() {
        sink.line(line)?;
    }
    Ok(())
}
