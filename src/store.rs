//! Store facade
//!
//! The narrow caller-facing surface. A [`Store`] is an explicitly
//! constructed handle over one storage engine plus one value codec; callers
//! that need shared access clone the engine `Arc` into further stores
//! rather than reaching for a process-wide singleton.
//!
//! ## Control flow
//!
//! Every operation enters through key normalization to obtain a byte span.
//! Reads resolve effective options (optionally pinned to a snapshot), then
//! either perform a direct point lookup or open a cursor; stored bytes pass
//! through the value codec before returning. Writes go through a direct
//! point write or accumulate in a batch applied as one atomic unit.

use std::sync::Arc;

use tracing::debug;

use crate::batch::BatchWriter;
use crate::codec::{IdentityCodec, ValueCodec};
use crate::config::Config;
use crate::cursor::{Cursor, Direction};
use crate::engine::{MemoryEngine, StorageEngine};
use crate::error::Result;
use crate::key::Key;
use crate::options::{ReadOptions, SnapshotId};

/// A handle over one storage engine and one value codec
///
/// All methods take `&self`; concurrent reads from multiple threads are
/// safe whenever the underlying engine's reads are. The store keeps no
/// mutable state of its own beyond the engine reference and the immutable
/// base options.
pub struct Store<C: ValueCodec = IdentityCodec> {
    engine: Arc<dyn StorageEngine>,
    codec: C,
    config: Config,
    base_options: ReadOptions,
}

impl Store<IdentityCodec> {
    /// Open a store over a fresh in-memory engine with the identity codec
    pub fn open_in_memory(config: Config) -> Self {
        Self::new(Arc::new(MemoryEngine::new()), IdentityCodec, config)
    }
}

impl<C: ValueCodec> Store<C> {
    /// Create a store over an existing engine
    pub fn new(engine: Arc<dyn StorageEngine>, codec: C, config: Config) -> Self {
        let base_options = config.base_read_options();
        Self {
            engine,
            codec,
            config,
            base_options,
        }
    }

    // =========================================================================
    // Point Operations
    // =========================================================================

    /// Look up the value stored under `key`
    ///
    /// A missing key is a normal outcome, returned as `Ok(None)`.
    pub fn get(&self, key: &Key) -> Result<Option<C::Value>> {
        self.get_resolved(key, None)
    }

    /// Look up `key` through a snapshot, seeing the store as it was when
    /// the snapshot was taken
    pub fn get_with_snapshot(
        &self,
        key: &Key,
        snapshot: SnapshotId,
    ) -> Result<Option<C::Value>> {
        self.get_resolved(key, Some(snapshot))
    }

    fn get_resolved(&self, key: &Key, snapshot: Option<SnapshotId>) -> Result<Option<C::Value>> {
        let options = self.base_options.resolve(snapshot);
        let raw = self.engine.get(key.as_span(), &options)?;
        match raw {
            Some(bytes) => {
                let value = self.codec.decode(key, &bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Store `value` under `key`, overwriting any existing value
    pub fn put(&self, key: &Key, value: &C::Value) -> Result<()> {
        let encoded = self.codec.encode(key, value)?;
        debug!(key_len = key.len(), value_len = encoded.len(), "put");
        self.engine.put(key.as_span(), &encoded)
    }

    /// Remove `key`; no-op for a missing key
    pub fn delete(&self, key: &Key) -> Result<()> {
        debug!(key_len = key.len(), "delete");
        self.engine.delete(key.as_span())
    }

    // =========================================================================
    // Cursors
    // =========================================================================

    /// Open a cursor over the store
    ///
    /// With a start key the walk begins at the first stored key >= start
    /// (backward walks step back from that landing point); without one it
    /// begins at the first key (forward) or last key (backward). A
    /// snapshot pins the walk to a frozen point-in-time view.
    pub fn cursor(
        &self,
        direction: Direction,
        start: Option<&Key>,
        snapshot: Option<SnapshotId>,
    ) -> Result<Cursor<'_, C>> {
        self.open_cursor(direction, start, None, snapshot)
    }

    /// Open a cursor that stops at an inclusive end key
    ///
    /// Advancing past `end` exhausts the cursor instead of continuing to
    /// the edge of the keyspace.
    pub fn cursor_bounded(
        &self,
        direction: Direction,
        start: Option<&Key>,
        end: &Key,
        snapshot: Option<SnapshotId>,
    ) -> Result<Cursor<'_, C>> {
        self.open_cursor(direction, start, Some(end), snapshot)
    }

    fn open_cursor(
        &self,
        direction: Direction,
        start: Option<&Key>,
        end: Option<&Key>,
        snapshot: Option<SnapshotId>,
    ) -> Result<Cursor<'_, C>> {
        let options = self.base_options.resolve(snapshot);
        let iter = self.engine.iterator(&options)?;
        Cursor::open(
            iter,
            &self.codec,
            direction,
            start,
            end,
            self.config.prefer_text_keys,
        )
    }

    // =========================================================================
    // Batches & Snapshots
    // =========================================================================

    /// Start a new atomic write batch
    pub fn batch(&self) -> BatchWriter<'_, C> {
        BatchWriter::new(self.engine.as_ref(), &self.codec)
    }

    /// Take a consistent point-in-time snapshot
    ///
    /// The caller is responsible for releasing it with
    /// [`release_snapshot`](Self::release_snapshot); the store only
    /// borrows it for individual reads and cursor lifetimes.
    pub fn snapshot(&self) -> SnapshotId {
        self.engine.snapshot()
    }

    /// Release a snapshot back to the engine
    pub fn release_snapshot(&self, snapshot: SnapshotId) {
        self.engine.release_snapshot(snapshot);
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// The underlying engine handle
    pub fn engine(&self) -> &Arc<dyn StorageEngine> {
        &self.engine
    }

    /// The configuration this store was opened with
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn setup_store() -> Store<IdentityCodec> {
        Store::open_in_memory(Config::default())
    }

    #[test]
    fn test_store_put_get() {
        let store = setup_store();

        store
            .put(&Key::from("hello"), &Bytes::from_static(b"world"))
            .unwrap();
        let result = store.get(&Key::from("hello")).unwrap();

        assert_eq!(result, Some(Bytes::from_static(b"world")));
    }

    #[test]
    fn test_store_get_missing_key_is_none() {
        let store = setup_store();
        assert_eq!(store.get(&Key::from("nope")).unwrap(), None);
    }

    #[test]
    fn test_text_and_binary_keys_address_same_entry() {
        let store = setup_store();

        store
            .put(&Key::from("shared"), &Bytes::from_static(b"v"))
            .unwrap();
        let via_binary = store.get(&Key::from(&b"shared"[..])).unwrap();

        assert_eq!(via_binary, Some(Bytes::from_static(b"v")));
    }

    #[test]
    fn test_store_delete() {
        let store = setup_store();
        let key = Key::from("k");

        store.put(&key, &Bytes::from_static(b"v")).unwrap();
        store.delete(&key).unwrap();

        assert_eq!(store.get(&key).unwrap(), None);
    }

    #[test]
    fn test_snapshot_read_ignores_later_write() {
        let store = setup_store();
        let key = Key::from("k");
        store.put(&key, &Bytes::from_static(b"before")).unwrap();

        let snapshot = store.snapshot();
        store.put(&key, &Bytes::from_static(b"after")).unwrap();

        assert_eq!(
            store.get_with_snapshot(&key, snapshot).unwrap(),
            Some(Bytes::from_static(b"before"))
        );
        assert_eq!(store.get(&key).unwrap(), Some(Bytes::from_static(b"after")));

        store.release_snapshot(snapshot);
    }

    #[test]
    fn test_two_stores_can_share_one_engine() {
        let engine: Arc<dyn StorageEngine> = Arc::new(MemoryEngine::new());
        let writer = Store::new(engine.clone(), IdentityCodec, Config::default());
        let reader = Store::new(engine, IdentityCodec, Config::default());

        writer
            .put(&Key::from("k"), &Bytes::from_static(b"v"))
            .unwrap();

        assert_eq!(
            reader.get(&Key::from("k")).unwrap(),
            Some(Bytes::from_static(b"v"))
        );
    }
}
