use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Jsonl,
    Csv,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Reads a file and searches it for a keyword concurrently, one worker per chunk."
)]
pub struct CliOptions {
    /// Path of the file to scan
    #[arg(short, long)]
    pub file: PathBuf,

    /// Total run timeout in milliseconds (ignored unless greater than zero)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Optional path to config file (YAML)
    #[arg(long)]
    pub config_path: Option<PathBuf>,

    /// Number of chunks, one worker thread each
    #[arg(long)]
    pub workers: Option<usize>,

    /// Keyword to search for (overrides config)
    #[arg(long)]
    pub keyword: Option<String>,

    /// Maximum number of results kept for the report
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

pub fn parse() -> CliOptions {
    CliOptions::parse()
}
