//! # Pipeline Module
//!
//! Plans chunks, runs one keyword worker per chunk and collects their
//! results through a single aggregator.

pub mod events;
pub mod workers;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use crossbeam_channel::bounded;
use serde::Serialize;
use tracing::{info, warn};

use crate::chunk::plan_chunks;
use crate::config::Config;
use crate::constants::RESULT_CHANNEL_CAPACITY;
use crate::scanner::TokenMatcher;

use events::ScanResult;
use workers::ScanRequest;

/// Run statistics, returned next to the retained results
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub keyword: String,
    pub workers: usize,
    pub total_bytes: u64,
    pub chunk_limit: u64,
    pub received: u64,
    pub matched: u64,
    pub not_matched: u64,
    pub timed_out: u64,
    pub discarded: u64,
    pub panicked_workers: usize,
    pub elapsed_ms: f64,
}

#[derive(Debug)]
pub struct ScanOutcome {
    /// At most `max_results` results, in arrival order
    pub results: Vec<ScanResult>,
    pub summary: RunSummary,
}

/// Scan `input` for the matcher's keyword.
///
/// `total_len` comes from the caller's stat of the file and `start` is the
/// instant the run deadline is measured from. Worker failures never surface
/// here; only thread spawn failures and an aggregator panic do.
pub fn run_pipeline(
    cfg: &Config,
    input: &Path,
    total_len: u64,
    matcher: Arc<dyn TokenMatcher>,
    start: Instant,
) -> Result<ScanOutcome> {
    PipelineRunner {
        cfg,
        input,
        total_len,
        matcher,
        start,
    }
    .run()
}

struct PipelineRunner<'a> {
    cfg: &'a Config,
    input: &'a Path,
    total_len: u64,
    matcher: Arc<dyn TokenMatcher>,
    start: Instant,
}

impl PipelineRunner<'_> {
    fn run(self) -> Result<ScanOutcome> {
        let chunks = plan_chunks(self.total_len, self.cfg.workers);
        let chunk_limit = chunks.first().map(|c| c.limit).unwrap_or(0);
        let deadline = self.cfg.deadline();
        info!(
            "chunk_count={} chunk_limit={} deadline_ms={} keyword={}",
            chunks.len(),
            chunk_limit,
            deadline.as_millis(),
            self.matcher.keyword()
        );

        let (results_tx, results_rx) = bounded::<ScanResult>(RESULT_CHANNEL_CAPACITY);
        let aggregator = workers::spawn_aggregator(self.cfg.max_results, results_rx)
            .context("failed to spawn result aggregator")?;

        let path: Arc<Path> = Arc::from(self.input);
        let mut handles = Vec::with_capacity(chunks.len());
        let mut spawn_error = None;
        for chunk in chunks {
            let request = ScanRequest {
                start: self.start,
                deadline,
                path: Arc::clone(&path),
                chunk,
                results: results_tx.clone(),
            };
            match workers::spawn_keyword_worker(request, Arc::clone(&self.matcher)) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    spawn_error = Some(
                        anyhow::Error::new(err)
                            .context(format!("failed to spawn worker for chunk {}", chunk.id)),
                    );
                    break;
                }
            }
        }

        // a failed spawn drops the monitor closure, and with it the last sender
        let monitor = workers::spawn_completion_monitor(handles, results_tx);

        let aggregated = aggregator
            .join()
            .map_err(|_| anyhow!("result aggregator panicked"))?;

        let panicked_workers = match monitor {
            Ok(handle) => handle
                .join()
                .map_err(|_| anyhow!("completion monitor panicked"))?,
            Err(err) => {
                warn!("failed to spawn completion monitor: {err}");
                return Err(anyhow::Error::new(err).context("failed to spawn completion monitor"));
            }
        };
        if let Some(err) = spawn_error {
            return Err(err);
        }

        let tally = aggregated.tally;
        let summary = RunSummary {
            run_id: self.cfg.run_id.clone(),
            keyword: self.matcher.keyword().to_string(),
            workers: self.cfg.workers,
            total_bytes: self.total_len,
            chunk_limit,
            received: tally.received,
            matched: tally.matched,
            not_matched: tally.not_matched,
            timed_out: tally.timed_out,
            discarded: tally.discarded,
            panicked_workers,
            elapsed_ms: self.start.elapsed().as_secs_f64() * 1000.0,
        };

        Ok(ScanOutcome {
            results: aggregated.results,
            summary,
        })
    }
}
