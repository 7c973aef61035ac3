//! Shared constants for the scan pipeline.

/// Keyword searched for when none is configured.
pub const DEFAULT_KEYWORD: &str = "fico";

/// Number of chunks (and worker threads) per run.
pub const DEFAULT_WORKERS: usize = 10;

/// Total run deadline when neither config nor CLI set one.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Maximum number of results retained by the aggregator.
pub const MAX_RESULTS: usize = 10;

/// Byte that delimits tokens and marks word boundaries when realigning.
pub const WORD_SEPARATOR: u8 = b' ';

/// Capacity of the shared results channel. Zero makes every send a
/// rendezvous with the aggregator.
pub const RESULT_CHANNEL_CAPACITY: usize = 0;
