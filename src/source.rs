use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use thiserror::Error;

use crate::constants::WORD_SEPARATOR;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to seek to offset {offset}: {source}")]
    Seek {
        offset: u64,
        source: std::io::Error,
    },
    #[error("end of file reached before a word boundary at offset {offset}")]
    AlignmentEof { offset: u64 },
    #[error("alignment read failed at offset {offset}: {source}")]
    Alignment {
        offset: u64,
        source: std::io::Error,
    },
    #[error("read failed after {bytes_read} bytes: {source}")]
    Read {
        bytes_read: u64,
        source: std::io::Error,
    },
}

/// Per-worker reader positioned inside the scanned file.
///
/// Each worker opens its own handle, so seek cursors are never shared.
pub struct ChunkReader {
    reader: BufReader<File>,
    offset: u64,
    bytes_read: u64,
}

impl ChunkReader {
    pub fn open(path: &Path, offset: u64) -> Result<Self, SourceError> {
        let mut file = File::open(path).map_err(|source| SourceError::Open {
            path: path.display().to_string(),
            source,
        })?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|source| SourceError::Seek { offset, source })?;
        Ok(Self {
            reader: BufReader::new(file),
            offset,
            bytes_read: 0,
        })
    }

    /// Bytes consumed by `next_token` so far. Alignment bytes are not counted.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Skip the tail of a word cut by the chunk boundary.
    ///
    /// A no-op at offset 0. Otherwise consumes bytes up to and including the
    /// next separator; hitting EOF first is an error.
    pub fn align(&mut self) -> Result<u64, SourceError> {
        if self.offset == 0 {
            return Ok(0);
        }
        let mut skipped = Vec::new();
        let n = self
            .reader
            .read_until(WORD_SEPARATOR, &mut skipped)
            .map_err(|source| SourceError::Alignment {
                offset: self.offset,
                source,
            })?;
        if skipped.last() != Some(&WORD_SEPARATOR) {
            return Err(SourceError::AlignmentEof {
                offset: self.offset,
            });
        }
        Ok(n as u64)
    }

    /// Next separator-delimited token, separator included.
    ///
    /// The final token of the file may lack a separator. Returns `None` once
    /// the file is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        let mut token = Vec::new();
        let n = self
            .reader
            .read_until(WORD_SEPARATOR, &mut token)
            .map_err(|source| SourceError::Read {
                bytes_read: self.bytes_read,
                source,
            })?;
        if n == 0 {
            return Ok(None);
        }
        self.bytes_read += n as u64;
        Ok(Some(token))
    }
}

/// Size of the input file in bytes.
///
/// Fails when the path is missing or is not a regular file; callers treat
/// this as fatal before any worker starts.
pub fn input_len(path: &Path) -> anyhow::Result<u64> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("cannot stat input {}: {e}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("input is not a regular file: {}", path.display());
    }
    Ok(metadata.len())
}
