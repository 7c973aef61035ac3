//! Shared helpers for pipeline integration tests.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ficoscan::config::{self, Config};
use ficoscan::pipeline::{self, ScanOutcome};
use ficoscan::scanner::{self, TokenMatcher};

/// Scratch file kept alive for the duration of a test.
pub struct Fixture {
    _dir: tempfile::TempDir,
    pub path: PathBuf,
}

pub fn write_fixture(content: &[u8]) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("input.txt");
    fs::write(&path, content).expect("write input");
    Fixture { _dir: dir, path }
}

/// Default config with the given worker count and deadline.
pub fn test_config(run_id: &str, workers: usize, timeout: Duration) -> Config {
    let mut cfg = config::load_config(None).expect("config").config;
    cfg.run_id = run_id.to_string();
    cfg.workers = workers;
    cfg.timeout_ms = timeout.as_millis() as u64;
    cfg
}

pub fn run_scan(cfg: &Config, fixture: &Fixture) -> ScanOutcome {
    let total_len = fs::metadata(&fixture.path).expect("stat").len();
    let matcher: Arc<dyn TokenMatcher> =
        Arc::from(scanner::build_token_matcher(cfg).expect("matcher"));
    pipeline::run_pipeline(cfg, &fixture.path, total_len, matcher, Instant::now())
        .expect("pipeline")
}

/// `count` filler words of `word ` followed by `tail`.
pub fn filler_with_tail(word: &str, count: usize, tail: &str) -> Vec<u8> {
    let mut data = Vec::with_capacity((word.len() + 1) * count + tail.len());
    for _ in 0..count {
        data.extend_from_slice(word.as_bytes());
        data.push(b' ');
    }
    data.extend_from_slice(tail.as_bytes());
    data
}
