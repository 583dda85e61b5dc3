//! Content Sources
//!
//! Supplies filler bytes for materialized files: either zeros or a buffer of
//! fetched text repeated cyclically. The buffer is built once and shared
//! read-only for the rest of the run.

pub mod fetch;

pub use fetch::{fetch_all, FetchReport, HttpTextSource, TextSource};

use crate::types::FillMode;
use std::borrow::Cow;
use std::sync::Arc;

/// Immutable, non-empty byte buffer used cyclically as filler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBuffer {
    bytes: Arc<[u8]>,
}

impl ContentBuffer {
    /// Wrap `bytes`; `None` when empty since an empty buffer cannot fill anything.
    pub fn new(bytes: Vec<u8>) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        Some(Self {
            bytes: Arc::from(bytes),
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes starting at `offset mod len`, wrapping at most once.
    ///
    /// Returns `min(max_len, len)` bytes. Borrows when the range does not
    /// cross the end of the buffer.
    pub fn chunk_at(&self, offset: u64, max_len: usize) -> Cow<'_, [u8]> {
        let len = self.bytes.len();
        let start = (offset % len as u64) as usize;
        let take = max_len.min(len);
        let end = start + take;

        if end <= len {
            Cow::Borrowed(&self.bytes[start..end])
        } else {
            let mut chunk = Vec::with_capacity(take);
            chunk.extend_from_slice(&self.bytes[start..]);
            chunk.extend_from_slice(&self.bytes[..end - len]);
            Cow::Owned(chunk)
        }
    }
}

/// Active source of filler bytes for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Zero,
    Buffer(ContentBuffer),
}

impl ContentSource {
    pub fn zero() -> Self {
        ContentSource::Zero
    }

    /// Effective fill mode of this source
    pub fn fill_mode(&self) -> FillMode {
        match self {
            ContentSource::Zero => FillMode::Zero,
            ContentSource::Buffer(_) => FillMode::Text,
        }
    }

    /// Buffer length in bytes, zero for zero fill
    pub fn buffer_len(&self) -> usize {
        match self {
            ContentSource::Zero => 0,
            ContentSource::Buffer(buffer) => buffer.len(),
        }
    }

    /// Next chunk of filler starting at `offset`.
    ///
    /// Zero fill always yields `max_len` bytes. Buffer fill yields at most
    /// `min(max_len, buffer_len)` bytes, so callers asking for more must loop.
    pub fn next_chunk(&self, offset: u64, max_len: usize) -> Cow<'_, [u8]> {
        match self {
            ContentSource::Zero => Cow::Owned(vec![0u8; max_len]),
            ContentSource::Buffer(buffer) => buffer.chunk_at(offset, max_len),
        }
    }
}
