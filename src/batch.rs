//! Batch writing
//!
//! A [`BatchWriter`] accumulates put/delete operations in call order and
//! applies them to the engine as one atomic unit: either every entry
//! becomes visible or none does. The batch is consumed by `commit`,
//! success or failure; later mutations fail rather than silently writing
//! into a new batch.

use tracing::debug;

use crate::codec::ValueCodec;
use crate::engine::{StorageEngine, WriteBatch};
use crate::error::{BridgeError, Result};
use crate::key::Key;

/// Accumulates write operations for one atomic commit
///
/// Created by [`Store::batch`](crate::Store::batch). Values are encoded
/// through the store's codec at append time, so an encode failure is
/// reported at the `put` call, not at commit.
pub struct BatchWriter<'a, C: ValueCodec> {
    engine: &'a dyn StorageEngine,
    codec: &'a C,

    /// Pending entries; `None` once committed
    pending: Option<WriteBatch>,
}

impl<'a, C: ValueCodec> BatchWriter<'a, C> {
    pub(crate) fn new(engine: &'a dyn StorageEngine, codec: &'a C) -> Self {
        Self {
            engine,
            codec,
            pending: Some(WriteBatch::new()),
        }
    }

    /// Append a put entry
    ///
    /// Fails with [`BridgeError::BatchAlreadyCommitted`] after `commit`.
    pub fn put(&mut self, key: &Key, value: &C::Value) -> Result<()> {
        let batch = self
            .pending
            .as_mut()
            .ok_or(BridgeError::BatchAlreadyCommitted)?;
        let encoded = self.codec.encode(key, value)?;
        batch.put(key.as_span(), encoded);
        Ok(())
    }

    /// Append a delete entry
    ///
    /// Fails with [`BridgeError::BatchAlreadyCommitted`] after `commit`.
    pub fn delete(&mut self, key: &Key) -> Result<()> {
        let batch = self
            .pending
            .as_mut()
            .ok_or(BridgeError::BatchAlreadyCommitted)?;
        batch.delete(key.as_span());
        Ok(())
    }

    /// Apply every pending entry as one atomic unit
    ///
    /// Consumes the batch whether the engine accepts it or not; a second
    /// `commit` (or any later `put`/`delete`) fails with
    /// [`BridgeError::BatchAlreadyCommitted`]. Committing an empty batch
    /// succeeds without touching the engine.
    pub fn commit(&mut self) -> Result<()> {
        let batch = self
            .pending
            .take()
            .ok_or(BridgeError::BatchAlreadyCommitted)?;

        if batch.is_empty() {
            debug!("empty batch commit, skipping engine write");
            return Ok(());
        }

        debug!(entries = batch.len(), "committing batch");
        self.engine.write(batch)
    }

    /// Number of pending entries; zero once committed
    pub fn len(&self) -> usize {
        self.pending.as_ref().map_or(0, WriteBatch::len)
    }

    /// Whether no entries are pending
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `commit` has already consumed this batch
    pub fn is_committed(&self) -> bool {
        self.pending.is_none()
    }
}
