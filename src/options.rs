//! Read options and snapshot handles
//!
//! Read-heavy call sites share one base [`ReadOptions`] value; individual
//! reads opt into point-in-time isolation through [`ReadOptions::resolve`]
//! without mutating the shared base.

/// Opaque handle for an engine-owned snapshot
///
/// Minted by [`StorageEngine::snapshot`](crate::StorageEngine::snapshot)
/// and released with
/// [`StorageEngine::release_snapshot`](crate::StorageEngine::release_snapshot).
/// The bridge only borrows it for the duration of one read or one cursor's
/// life; the caller owns the release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotId(u64);

impl SnapshotId {
    /// Wrap a raw engine-assigned snapshot number
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw engine-assigned snapshot number
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Options governing a single read or cursor
///
/// Constructed per call; never persisted by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Whether the read should populate the engine's block cache
    pub fill_cache: bool,

    /// Snapshot to pin the read to; `None` reads the live state
    pub snapshot: Option<SnapshotId>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            fill_cache: true,
            snapshot: None,
        }
    }
}

impl ReadOptions {
    /// Resolve effective options for one read
    ///
    /// If `snapshot_override` is given, the result carries this base's
    /// `fill_cache` flag plus the override snapshot. Any snapshot already
    /// set on the base is deliberately discarded: a caller-specified
    /// snapshot always wins entirely, it is not merged field-by-field.
    /// Without an override the base is used unchanged, including its own
    /// snapshot if set.
    ///
    /// Pure selection logic; `self` is never mutated.
    pub fn resolve(&self, snapshot_override: Option<SnapshotId>) -> ReadOptions {
        match snapshot_override {
            Some(snapshot) => ReadOptions {
                fill_cache: self.fill_cache,
                snapshot: Some(snapshot),
            },
            None => *self,
        }
    }
}
