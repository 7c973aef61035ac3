//! # Pipeline Events
//!
//! Terminal results that workers hand to the aggregator.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// How a keyword worker finished its chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScanStatus {
    /// The keyword was found as a whole word
    #[serde(rename = "SUCCESS")]
    Matched,
    /// The chunk was exhausted, or could not be read, without a match
    #[serde(rename = "FAILURE")]
    NotMatched,
    /// The run deadline passed before the chunk was finished
    #[serde(rename = "TIMEOUT")]
    TimedOut,
}

impl ScanStatus {
    pub fn label(self) -> &'static str {
        match self {
            ScanStatus::Matched => "SUCCESS",
            ScanStatus::NotMatched => "FAILURE",
            ScanStatus::TimedOut => "TIMEOUT",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The single result a worker emits before it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub chunk_id: u64,
    pub status: ScanStatus,
    /// Time from run start to the match; only set for `Matched`
    pub elapsed: Option<Duration>,
    /// Bytes consumed within the chunk when the worker stopped
    pub byte_count: u64,
}

impl ScanResult {
    pub fn matched(chunk_id: u64, elapsed: Duration, byte_count: u64) -> Self {
        Self {
            chunk_id,
            status: ScanStatus::Matched,
            elapsed: Some(elapsed),
            byte_count,
        }
    }

    pub fn not_matched(chunk_id: u64, byte_count: u64) -> Self {
        Self {
            chunk_id,
            status: ScanStatus::NotMatched,
            elapsed: None,
            byte_count,
        }
    }

    pub fn timed_out(chunk_id: u64) -> Self {
        Self {
            chunk_id,
            status: ScanStatus::TimedOut,
            elapsed: None,
            byte_count: 0,
        }
    }

    pub fn elapsed_ms(&self) -> Option<f64> {
        self.elapsed.map(|d| d.as_secs_f64() * 1000.0)
    }
}
