//! Analyze Command
//!
//! Walks a project tree, requests a review for every file and prints the
//! aggregated quality report.
//!
//! Usage:
//!   codegrade analyze [PATH] [--format text|json] [--output FILE]

use std::path::PathBuf;

use crate::ai::ServiceClient;
use crate::analyzer::{AnalysisPipeline, AnalysisRun};
use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::report::{self, ConsoleSink, FileSink, ReportFormat, format_elapsed};
use crate::types::Result;

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Project root (defaults to the current directory)
    pub path: Option<PathBuf>,
    pub format: ReportFormat,
    /// Write the report here instead of stdout
    pub output: Option<PathBuf>,
    pub provider: Option<String>,
    pub model: Option<String>,
}

pub async fn run(options: AnalyzeOptions) -> Result<()> {
    let output = Output::new();
    let root = options.path.unwrap_or_else(|| PathBuf::from("."));

    let config = ConfigLoader::load(&root)?.with_overrides(options.provider, options.model);
    config.validate()?;

    let client = ServiceClient::from_config(&config.llm.to_provider_config());
    match &client {
        ServiceClient::Available(_) => {
            output.info(&format!("Using AI service: {}", client.describe()))
        }
        ServiceClient::Unavailable { reason } => output.warning(&format!(
            "AI service not available: {}. Files will be listed without ratings.",
            reason
        )),
    }

    let pipeline = AnalysisPipeline::new(&config, client);
    let run = pipeline.run(&root).await?;

    write_report(&run, options.format, options.output, &output)
}

fn write_report(
    run: &AnalysisRun,
    format: ReportFormat,
    destination: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    match destination {
        Some(path) => {
            let mut sink = FileSink::create(&path)?;
            report::render(run, format, &mut sink)?;
            sink.finish()?;
            output.success(&format!(
                "Analyzed {} files in {}; report written to {}",
                run.project_info.file_count(),
                format_elapsed(run.elapsed),
                path.display()
            ));
        }
        None => {
            let mut sink = ConsoleSink::new(format == ReportFormat::Text);
            report::render(run, format, &mut sink)?;
        }
    }
    Ok(())
}
