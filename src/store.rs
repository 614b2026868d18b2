//! Frame-occurrence store: mapping from window id to the most recent
//! occurrence seen during a run.
//!
//! Semantics are last-writer-wins per id. A single record per id is
//! enough for maximal-clone discovery because detection is a single
//! forward pass with greedy extension and a scan jump past each matched
//! region — an older occurrence stops being useful the moment a newer
//! one arrives, since any later match prefers the closer partner.
//!
//! Operations return `Result` so that I/O-bound backends can surface
//! `StoreUnavailable`; the default in-memory store only fails after
//! `close()`.
use std::collections::HashMap;

use crate::error::{DetectError, Result};

/// The last observed frame with a given id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRecord {
    pub source_id: String,
    /// First significant-token index of the window.
    pub start: usize,
    /// One past the last significant-token index.
    pub end: usize,
    /// 0-based window ordinal within the source's frame sequence.
    pub index: usize,
}

pub trait FrameStore {
    fn get(&mut self, id: u64) -> Result<Option<StoreRecord>>;
    fn set(&mut self, id: u64, record: StoreRecord) -> Result<()>;
    /// Release resources. Idempotent; get/set after close fail.
    fn close(&mut self) -> Result<()>;
}

/// Default in-process store backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<u64, StoreRecord>,
    closed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            Err(DetectError::Store("store is closed".to_string()))
        } else {
            Ok(())
        }
    }
}

impl FrameStore for MemoryStore {
    fn get(&mut self, id: u64) -> Result<Option<StoreRecord>> {
        self.check_open()?;
        Ok(self.records.get(&id).cloned())
    }

    fn set(&mut self, id: u64, record: StoreRecord) -> Result<()> {
        self.check_open()?;
        self.records.insert(id, record);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.records.clear();
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
