//! # Utility Module
//!
//! Glue between CLI options, configuration and the report layer.

use anyhow::Result;
use tracing::warn;

use crate::cli::{CliOptions, OutputFormat};
use crate::config::Config;
use crate::report::ReportFormat;

/// Convert CLI output format to internal enum
pub fn format_from_cli(format: OutputFormat) -> ReportFormat {
    match format {
        OutputFormat::Table => ReportFormat::Table,
        OutputFormat::Jsonl => ReportFormat::Jsonl,
        OutputFormat::Csv => ReportFormat::Csv,
    }
}

/// Apply CLI overrides on top of the loaded config and re-validate it.
pub fn apply_cli_overrides(cfg: &mut Config, opts: &CliOptions) -> Result<()> {
    match opts.timeout {
        Some(ms) if ms > 0 => cfg.timeout_ms = ms,
        Some(_) => warn!("ignoring non-positive --timeout; using {} ms", cfg.timeout_ms),
        None => {}
    }
    if let Some(workers) = opts.workers {
        cfg.workers = workers;
    }
    if let Some(keyword) = &opts.keyword {
        cfg.keyword = keyword.clone();
    }
    if let Some(max_results) = opts.max_results {
        cfg.max_results = max_results;
    }
    cfg.validate()
}
