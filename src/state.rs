//! World state access
//!
//! The engine only ever touches the ledger through this trait: point reads,
//! point writes, and an ordered range scan. The hosting ledger owns conflict
//! detection between concurrent transactions; the engine just reads, decides
//! and writes.

use super::error::LedgerError;
use sled::Db;
use std::ops::Bound;
use std::sync::Arc;

pub trait WorldState {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Scan `[start, end)` in ascending lexicographic key order. An empty
    /// bound means unbounded on that side, so `range_scan("", "")` walks the
    /// whole key space.
    fn range_scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError>;
}

/// Sled-backed world state.
pub struct SledWorldState {
    db: Arc<Db>,
}

impl SledWorldState {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }
}

impl WorldState for SledWorldState {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.db.get(key.as_bytes())?.map(|ivec| ivec.to_vec()))
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.db.insert(key.as_bytes(), value)?;
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start.as_bytes().to_vec())
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.as_bytes().to_vec())
        };

        let mut entries = Vec::new();
        for item in self.db.range((lower, upper)) {
            let (key, value) = item?;
            entries.push((String::from_utf8_lossy(&key).into_owned(), value.to_vec()));
        }
        Ok(entries)
    }
}
