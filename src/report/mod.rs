pub mod json;
pub mod md;

use crate::error::{Result, ScorerError};
use crate::schema::SchemaReport;
use crate::types::lead::ScoredLead;
use crate::types::report::BatchSummary;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render_scored(scored: &[ScoredLead], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(scored).map_err(ScorerError::Json),
        OutputFormat::Md => Ok(md::scored_to_markdown(scored)),
    }
}

pub fn render_summary(summary: &BatchSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(summary).map_err(ScorerError::Json),
        OutputFormat::Md => Ok(md::summary_to_markdown(summary)),
    }
}

pub fn render_schema(report: &SchemaReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ScorerError::Json),
        OutputFormat::Md => Ok(md::schema_to_markdown(report)),
    }
}

/// Writes `rendered` to `output`, or prints it when no path is given.
pub fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, format!("{rendered}\n"))?;
            info!(path = %path.display(), "wrote report");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
