//! Storage engine contract
//!
//! The bridge does not implement an ordered store itself; it drives an
//! engine behind the [`StorageEngine`] trait. Any LSM-style store exposing
//! atomic point operations, consistent snapshots, a seekable bidirectional
//! iterator, and atomic batch application can sit behind it.
//! [`MemoryEngine`] is the in-process reference implementation.

mod memory;

pub use memory::MemoryEngine;

use bytes::Bytes;

use crate::error::Result;
use crate::options::{ReadOptions, SnapshotId};

// =============================================================================
// Write Batches
// =============================================================================

/// A single entry in a write batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    /// Store `value` under `key`
    Put { key: Vec<u8>, value: Bytes },

    /// Remove `key`
    Delete { key: Vec<u8> },
}

/// An ordered sequence of write operations applied atomically
///
/// Built up by [`BatchWriter`](crate::BatchWriter) and consumed by
/// [`StorageEngine::write`].
#[derive(Debug, Default)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a put entry
    pub fn put(&mut self, key: &[u8], value: Bytes) {
        self.ops.push(BatchOp::Put {
            key: key.to_vec(),
            value,
        });
    }

    /// Append a delete entry
    pub fn delete(&mut self, key: &[u8]) {
        self.ops.push(BatchOp::Delete { key: key.to_vec() });
    }

    /// Entries in call order
    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the batch has no entries
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Consume the batch into its entries
    pub fn into_ops(self) -> Vec<BatchOp> {
        self.ops
    }
}

// =============================================================================
// Engine Traits
// =============================================================================

/// An ordered, byte-oriented storage engine
///
/// All methods take `&self`; the engine handles its own synchronization.
/// Point writes and batch commits are serialized by the engine's atomicity
/// guarantee. A missing key on `get` is `Ok(None)`, never an error.
pub trait StorageEngine: Send + Sync {
    /// Point lookup
    fn get(&self, key: &[u8], options: &ReadOptions) -> Result<Option<Bytes>>;

    /// Point write
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Point delete; no-op for a missing key
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Apply a batch atomically: all entries become visible or none do
    fn write(&self, batch: WriteBatch) -> Result<()>;

    /// Open an iterator over the keyspace selected by `options`
    ///
    /// The iterator starts unpositioned; callers must seek before reading.
    fn iterator(&self, options: &ReadOptions) -> Result<Box<dyn EngineIterator>>;

    /// Take a consistent point-in-time snapshot
    fn snapshot(&self) -> SnapshotId;

    /// Release a snapshot previously taken with [`snapshot`](Self::snapshot)
    fn release_snapshot(&self, snapshot: SnapshotId);
}

/// One engine iterator, positioned by seek operations
///
/// `key` and `value` must only be called while `valid()` returns true.
/// Not thread-safe; confined to a single owner.
pub trait EngineIterator: Send {
    /// Position at the first key
    fn seek_to_first(&mut self) -> Result<()>;

    /// Position at the last key
    fn seek_to_last(&mut self) -> Result<()>;

    /// Position at the first key >= `target`; invalid if none exists
    fn seek(&mut self, target: &[u8]) -> Result<()>;

    /// Step to the next key in ascending order
    fn next(&mut self) -> Result<()>;

    /// Step to the previous key in ascending order
    fn prev(&mut self) -> Result<()>;

    /// Whether the iterator is positioned on an entry
    fn valid(&self) -> bool;

    /// Key at the current position
    fn key(&self) -> &[u8];

    /// Value at the current position
    fn value(&self) -> &[u8];
}
