//! # Pipeline Workers
//!
//! Keyword workers, the result aggregator and the completion monitor.

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, trace, warn};

use crate::chunk::ScanChunk;
use crate::scanner::{TokenMatcher, sanitize_token};
use crate::source::{ChunkReader, SourceError};

use super::events::{ScanResult, ScanStatus};

/// Everything one keyword worker needs; built once per chunk.
#[derive(Clone)]
pub struct ScanRequest {
    pub start: Instant,
    pub deadline: Duration,
    pub path: Arc<Path>,
    pub chunk: ScanChunk,
    pub results: Sender<ScanResult>,
}

/// Scan one chunk and classify how it ended.
///
/// Never fails: open, alignment and read errors are logged and reported as
/// `NotMatched`. The deadline is polled before every token read.
pub fn scan_chunk(request: &ScanRequest, matcher: &dyn TokenMatcher) -> ScanResult {
    let chunk = request.chunk;

    let mut reader = match ChunkReader::open(&request.path, chunk.offset) {
        Ok(reader) => reader,
        Err(err) => {
            warn!("chunk {} could not be opened: {err}", chunk.id);
            return ScanResult::not_matched(chunk.id, 0);
        }
    };

    if let Err(err) = reader.align() {
        match err {
            SourceError::AlignmentEof { .. } => debug!("chunk {}: {err}", chunk.id),
            _ => warn!("chunk {} alignment failed: {err}", chunk.id),
        }
        return ScanResult::not_matched(chunk.id, 0);
    }

    loop {
        if request.start.elapsed() >= request.deadline {
            debug!(
                "chunk {} timed out after {} bytes",
                chunk.id,
                reader.bytes_read()
            );
            return ScanResult::timed_out(chunk.id);
        }

        // soft cap: the token that crossed the limit has already been tested
        if reader.bytes_read() > chunk.limit {
            trace!("chunk {} exhausted without a match", chunk.id);
            return ScanResult::not_matched(chunk.id, reader.bytes_read());
        }

        let token = match reader.next_token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                trace!("chunk {} reached end of file", chunk.id);
                return ScanResult::not_matched(chunk.id, reader.bytes_read());
            }
            Err(err) => {
                warn!("chunk {} read error: {err}", chunk.id);
                return ScanResult::not_matched(chunk.id, reader.bytes_read());
            }
        };

        let sanitized = sanitize_token(&String::from_utf8_lossy(&token));
        if sanitized.is_empty() {
            continue;
        }
        if matcher.is_match(&sanitized) {
            let elapsed = request.start.elapsed();
            debug!(
                "chunk {} matched {:?} after {} bytes",
                chunk.id,
                matcher.keyword(),
                reader.bytes_read()
            );
            return ScanResult::matched(chunk.id, elapsed, reader.bytes_read());
        }
    }
}

/// Spawn a worker thread that scans its chunk and sends exactly one result.
pub fn spawn_keyword_worker(
    request: ScanRequest,
    matcher: Arc<dyn TokenMatcher>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("keyword-worker-{}", request.chunk.id))
        .spawn(move || {
            let result = scan_chunk(&request, matcher.as_ref());
            if let Err(err) = request.results.send(result) {
                warn!("results channel closed while sending chunk result: {err}");
            }
        })
}

/// Per-status counts of every result the aggregator received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub received: u64,
    pub matched: u64,
    pub not_matched: u64,
    pub timed_out: u64,
    /// Results drained after the cap was reached
    pub discarded: u64,
}

#[derive(Debug)]
pub struct AggregatedResults {
    pub results: Vec<ScanResult>,
    pub tally: StatusTally,
}

/// Single owner of the output list.
#[derive(Debug)]
pub struct Aggregator {
    cap: usize,
    results: Vec<ScanResult>,
    tally: StatusTally,
}

impl Aggregator {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            results: Vec::with_capacity(cap),
            tally: StatusTally::default(),
        }
    }

    /// Record one result; returns false when it was discarded.
    pub fn absorb(&mut self, result: ScanResult) -> bool {
        self.tally.received += 1;
        match result.status {
            ScanStatus::Matched => self.tally.matched += 1,
            ScanStatus::NotMatched => self.tally.not_matched += 1,
            ScanStatus::TimedOut => self.tally.timed_out += 1,
        }
        if self.results.len() < self.cap {
            self.results.push(result);
            true
        } else {
            self.tally.discarded += 1;
            false
        }
    }

    /// Consume the channel until every sender is gone.
    pub fn drain(mut self, rx: Receiver<ScanResult>) -> AggregatedResults {
        for result in rx {
            self.absorb(result);
        }
        self.finish()
    }

    pub fn finish(self) -> AggregatedResults {
        AggregatedResults {
            results: self.results,
            tally: self.tally,
        }
    }
}

/// Spawn the aggregator. Joining the handle is the completion signal.
pub fn spawn_aggregator(
    cap: usize,
    rx: Receiver<ScanResult>,
) -> std::io::Result<thread::JoinHandle<AggregatedResults>> {
    thread::Builder::new()
        .name("result-aggregator".to_string())
        .spawn(move || Aggregator::new(cap).drain(rx))
}

/// Spawn the monitor that closes the results channel.
///
/// It owns the last sender and drops it only after every worker has been
/// joined, so no worker can outlive the channel. Returns the number of
/// workers that panicked.
pub fn spawn_completion_monitor(
    handles: Vec<thread::JoinHandle<()>>,
    results_tx: Sender<ScanResult>,
) -> std::io::Result<thread::JoinHandle<usize>> {
    thread::Builder::new()
        .name("completion-monitor".to_string())
        .spawn(move || {
            let mut panicked = 0usize;
            for handle in handles {
                let name = handle.thread().name().unwrap_or("worker").to_string();
                if handle.join().is_err() {
                    panicked += 1;
                    warn!("{name} panicked before reporting a result");
                }
            }
            drop(results_tx);
            panicked
        })
}
