//! Ranked report built from the aggregator's output list.

pub mod csv;
pub mod jsonl;
pub mod table;

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use crate::pipeline::events::{ScanResult, ScanStatus};

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub chunk_id: u64,
    pub status: ScanStatus,
    pub elapsed_ms: Option<f64>,
    pub byte_count: u64,
}

#[derive(Debug, Clone)]
pub struct Report {
    /// Sorted by elapsed time, slowest match first; unmatched rows last
    pub rows: Vec<ReportRow>,
    /// `None` when nothing matched, since the ratio is undefined
    pub average_bytes_per_ms: Option<f64>,
}

impl Report {
    pub fn from_results(results: &[ScanResult]) -> Self {
        let mut sorted = results.to_vec();
        sorted.sort_by(|a, b| b.elapsed.cmp(&a.elapsed));

        let (total_bytes, total_ms) = sorted
            .iter()
            .filter(|r| r.status == ScanStatus::Matched)
            .fold((0u64, 0f64), |(bytes, ms), r| {
                (bytes + r.byte_count, ms + r.elapsed_ms().unwrap_or(0.0))
            });
        let average_bytes_per_ms = if total_ms > 0.0 {
            Some(total_bytes as f64 / total_ms)
        } else {
            None
        };

        let rows = sorted
            .into_iter()
            .map(|r| ReportRow {
                chunk_id: r.chunk_id,
                status: r.status,
                elapsed_ms: r.elapsed_ms(),
                byte_count: r.byte_count,
            })
            .collect();

        Self {
            rows,
            average_bytes_per_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Jsonl,
    Csv,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Writes a finished report to an output stream.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use ficoscan::pipeline::events::ScanResult;
/// use ficoscan::report::{self, Report, ReportFormat};
///
/// let results = vec![
///     ScanResult::matched(0, Duration::from_millis(4), 128),
///     ScanResult::timed_out(1),
/// ];
/// let report = Report::from_results(&results);
/// let mut out = Vec::new();
/// report::build_renderer(ReportFormat::Table, false)
///     .render(&report, &mut out)
///     .unwrap();
/// assert!(String::from_utf8(out).unwrap().contains("TIMEOUT"));
/// ```
pub trait ReportRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<(), ReportError>;
}

/// `color` only affects the table backend.
pub fn build_renderer(format: ReportFormat, color: bool) -> Box<dyn ReportRenderer> {
    match format {
        ReportFormat::Table => Box::new(table::TableRenderer { color }),
        ReportFormat::Jsonl => Box::new(jsonl::JsonlRenderer),
        ReportFormat::Csv => Box::new(csv::CsvRenderer),
    }
}
