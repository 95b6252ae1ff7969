//! In-memory reference engine
//!
//! BTreeMap-based engine with RwLock for concurrency, mirroring the shape
//! the bridge expects from a real LSM store: atomic point operations,
//! frozen snapshot views, atomic batch application, and seekable
//! bidirectional iterators. Intended for embedding and tests; it keeps no
//! on-disk state.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;

use crate::error::{BridgeError, Result};
use crate::options::{ReadOptions, SnapshotId};

use super::{BatchOp, EngineIterator, StorageEngine, WriteBatch};

type Tree = BTreeMap<Vec<u8>, Bytes>;

/// In-memory ordered storage engine
///
/// ## Concurrency:
/// - `live`: Protected by RwLock (many concurrent readers, exclusive writer)
/// - `snapshots`: Frozen trees behind their own RwLock, shared via Arc
/// - `next_snapshot_id`: Atomic counter (lock-free)
/// - All methods use `&self`
pub struct MemoryEngine {
    /// Current state of the store
    live: RwLock<Tree>,

    /// Frozen point-in-time copies, keyed by snapshot id
    snapshots: RwLock<HashMap<u64, Arc<Tree>>>,

    /// Next id for minted snapshots (atomic, lock-free)
    next_snapshot_id: AtomicU64,
}

impl MemoryEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self {
            live: RwLock::new(Tree::new()),
            snapshots: RwLock::new(HashMap::new()),
            next_snapshot_id: AtomicU64::new(1),
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.live.read().len()
    }

    /// Whether the live store is empty
    pub fn is_empty(&self) -> bool {
        self.live.read().is_empty()
    }

    /// Number of outstanding snapshots
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.read().len()
    }

    /// Look up a frozen snapshot tree; released or unknown ids fault
    fn frozen(&self, snapshot: SnapshotId) -> Result<Arc<Tree>> {
        self.snapshots
            .read()
            .get(&snapshot.as_u64())
            .cloned()
            .ok_or_else(|| {
                BridgeError::Engine(format!(
                    "snapshot {} not found (already released?)",
                    snapshot.as_u64()
                ))
            })
    }

    /// Materialize the tree a read should see: a frozen snapshot if the
    /// options name one, a copy of the live tree otherwise
    fn view(&self, options: &ReadOptions) -> Result<Arc<Tree>> {
        match options.snapshot {
            Some(snapshot) => self.frozen(snapshot),
            None => Ok(Arc::new(self.live.read().clone())),
        }
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageEngine for MemoryEngine {
    fn get(&self, key: &[u8], options: &ReadOptions) -> Result<Option<Bytes>> {
        // fill_cache has no effect here; the engine keeps no block cache
        match options.snapshot {
            Some(snapshot) => Ok(self.frozen(snapshot)?.get(key).cloned()),
            None => Ok(self.live.read().get(key).cloned()),
        }
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.live
            .write()
            .insert(key.to_vec(), Bytes::copy_from_slice(value));
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.live.write().remove(key);
        Ok(())
    }

    fn write(&self, batch: WriteBatch) -> Result<()> {
        // One write-lock acquisition covers the whole batch, so readers
        // observe either none of the entries or all of them
        let mut live = self.live.write();
        for op in batch.into_ops() {
            match op {
                BatchOp::Put { key, value } => {
                    live.insert(key, value);
                }
                BatchOp::Delete { key } => {
                    live.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn iterator(&self, options: &ReadOptions) -> Result<Box<dyn EngineIterator>> {
        let view = self.view(options)?;
        Ok(Box::new(MemoryIterator::new(view)))
    }

    fn snapshot(&self) -> SnapshotId {
        let id = self.next_snapshot_id.fetch_add(1, Ordering::SeqCst);
        let frozen = Arc::new(self.live.read().clone());
        self.snapshots.write().insert(id, frozen);
        SnapshotId::new(id)
    }

    fn release_snapshot(&self, snapshot: SnapshotId) {
        self.snapshots.write().remove(&snapshot.as_u64());
    }
}

/// Iterator over a pinned view of the engine
///
/// The view is fixed at creation (live copy or frozen snapshot), so a walk
/// never observes writes that land after the iterator was opened.
struct MemoryIterator {
    entries: Vec<(Vec<u8>, Bytes)>,
    position: Option<usize>,
}

impl MemoryIterator {
    fn new(view: Arc<Tree>) -> Self {
        let entries = view
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Vec<_>>();
        Self {
            entries,
            position: None,
        }
    }
}

impl EngineIterator for MemoryIterator {
    fn seek_to_first(&mut self) -> Result<()> {
        self.position = if self.entries.is_empty() { None } else { Some(0) };
        Ok(())
    }

    fn seek_to_last(&mut self) -> Result<()> {
        self.position = self.entries.len().checked_sub(1);
        Ok(())
    }

    fn seek(&mut self, target: &[u8]) -> Result<()> {
        // First index with key >= target
        let idx = self
            .entries
            .partition_point(|(key, _)| key.as_slice() < target);
        self.position = if idx < self.entries.len() { Some(idx) } else { None };
        Ok(())
    }

    fn next(&mut self) -> Result<()> {
        self.position = match self.position {
            Some(pos) if pos + 1 < self.entries.len() => Some(pos + 1),
            _ => None,
        };
        Ok(())
    }

    fn prev(&mut self) -> Result<()> {
        self.position = match self.position {
            Some(pos) => pos.checked_sub(1),
            None => None,
        };
        Ok(())
    }

    fn valid(&self) -> bool {
        self.position.is_some()
    }

    fn key(&self) -> &[u8] {
        let pos = self.position.expect("key() called on invalid iterator");
        &self.entries[pos].0
    }

    fn value(&self) -> &[u8] {
        let pos = self.position.expect("value() called on invalid iterator");
        &self.entries[pos].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ReadOptions {
        ReadOptions::default()
    }

    #[test]
    fn test_put_get_delete() {
        let engine = MemoryEngine::new();

        engine.put(b"k", b"v").unwrap();
        assert_eq!(
            engine.get(b"k", &opts()).unwrap(),
            Some(Bytes::from_static(b"v"))
        );

        engine.delete(b"k").unwrap();
        assert_eq!(engine.get(b"k", &opts()).unwrap(), None);
    }

    #[test]
    fn test_delete_missing_key_is_noop() {
        let engine = MemoryEngine::new();
        engine.delete(b"missing").unwrap();
        assert!(engine.is_empty());
    }

    #[test]
    fn test_batch_write_applies_all_entries() {
        let engine = MemoryEngine::new();
        engine.put(b"y", b"old").unwrap();

        let mut batch = WriteBatch::new();
        batch.put(b"x", Bytes::from_static(b"1"));
        batch.delete(b"y");
        engine.write(batch).unwrap();

        assert_eq!(
            engine.get(b"x", &opts()).unwrap(),
            Some(Bytes::from_static(b"1"))
        );
        assert_eq!(engine.get(b"y", &opts()).unwrap(), None);
    }

    #[test]
    fn test_snapshot_does_not_observe_later_writes() {
        let engine = MemoryEngine::new();
        engine.put(b"k", b"before").unwrap();

        let snapshot = engine.snapshot();
        engine.put(b"k", b"after").unwrap();

        let pinned = ReadOptions {
            snapshot: Some(snapshot),
            ..ReadOptions::default()
        };
        assert_eq!(
            engine.get(b"k", &pinned).unwrap(),
            Some(Bytes::from_static(b"before"))
        );
        assert_eq!(
            engine.get(b"k", &opts()).unwrap(),
            Some(Bytes::from_static(b"after"))
        );

        engine.release_snapshot(snapshot);
    }

    #[test]
    fn test_released_snapshot_read_fails() {
        let engine = MemoryEngine::new();
        let snapshot = engine.snapshot();
        engine.release_snapshot(snapshot);

        let pinned = ReadOptions {
            snapshot: Some(snapshot),
            ..ReadOptions::default()
        };
        let result = engine.get(b"k", &pinned);

        assert!(matches!(result, Err(BridgeError::Engine(_))));
    }

    #[test]
    fn test_iterator_seek_and_step() {
        let engine = MemoryEngine::new();
        engine.put(b"a", b"1").unwrap();
        engine.put(b"c", b"3").unwrap();
        engine.put(b"e", b"5").unwrap();

        let mut iter = engine.iterator(&opts()).unwrap();

        // Nearest-match seek lands on the first key >= target
        iter.seek(b"b").unwrap();
        assert!(iter.valid());
        assert_eq!(iter.key(), b"c");

        iter.next().unwrap();
        assert_eq!(iter.key(), b"e");

        iter.next().unwrap();
        assert!(!iter.valid());
    }

    #[test]
    fn test_iterator_seek_past_end_is_invalid() {
        let engine = MemoryEngine::new();
        engine.put(b"a", b"1").unwrap();

        let mut iter = engine.iterator(&opts()).unwrap();
        iter.seek(b"z").unwrap();

        assert!(!iter.valid());
    }

    #[test]
    fn test_iterator_prev_from_last() {
        let engine = MemoryEngine::new();
        engine.put(b"a", b"1").unwrap();
        engine.put(b"b", b"2").unwrap();

        let mut iter = engine.iterator(&opts()).unwrap();
        iter.seek_to_last().unwrap();
        assert_eq!(iter.key(), b"b");

        iter.prev().unwrap();
        assert_eq!(iter.key(), b"a");

        iter.prev().unwrap();
        assert!(!iter.valid());
    }

    #[test]
    fn test_iterator_on_empty_store() {
        let engine = MemoryEngine::new();
        let mut iter = engine.iterator(&opts()).unwrap();

        iter.seek_to_first().unwrap();
        assert!(!iter.valid());

        iter.seek_to_last().unwrap();
        assert!(!iter.valid());
    }
}
