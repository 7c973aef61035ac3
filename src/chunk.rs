/// A byte range assigned to one keyword worker.
///
/// `limit` is a soft cap: a worker keeps reading until it has consumed more
/// than `limit` bytes, so the token in progress is always completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanChunk {
    pub id: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Split `total_len` bytes into `workers` chunks.
///
/// Every chunk shares the same `limit` (`total_len / workers`). Consecutive
/// offsets are `limit + 1` apart; the extra byte is the separator a worker
/// discards while realigning to a word boundary. Trailing offsets may land
/// past the end of the file.
pub fn plan_chunks(total_len: u64, workers: usize) -> Vec<ScanChunk> {
    if workers == 0 {
        return Vec::new();
    }

    let limit = total_len / workers as u64;
    let stride = limit.saturating_add(1);
    let mut chunks = Vec::with_capacity(workers);
    let mut offset = 0u64;

    for id in 0..workers as u64 {
        chunks.push(ScanChunk { id, offset, limit });
        offset = offset.saturating_add(stride);
    }

    chunks
}
