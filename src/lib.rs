//! # keybridge
//!
//! A typed key-value bridge over ordered, byte-oriented storage engines:
//! - Text-or-binary keys normalized to one canonical keyspace
//! - Pluggable value codecs (identity passthrough or serde/bincode)
//! - Point reads/writes, snapshot-isolated reads
//! - Ordered cursors, forward and backward, optionally bounded
//! - Atomic multi-operation write batches
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Callers                               │
//! │            (text/binary keys, typed values)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Store<C>                                 │
//! │      Key ──▶ span        value ◀──▶ ValueCodec               │
//! │      ReadOptions::resolve (snapshot override rule)           │
//! └──────┬───────────────┬───────────────┬──────────────────────┘
//!        │               │               │
//!        ▼               ▼               ▼
//! ┌─────────────┐ ┌─────────────┐ ┌─────────────┐
//! │  point ops  │ │   Cursor    │ │ BatchWriter │
//! └──────┬──────┘ └──────┬──────┘ └──────┬──────┘
//!        │               │               │
//! ┌──────▼───────────────▼───────────────▼──────────────────────┐
//! │               StorageEngine (trait)                          │
//! │     get / put / delete / write / iterator / snapshot         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine beneath the trait is an external collaborator (any LSM-style
//! ordered store); [`MemoryEngine`] ships as the in-process reference
//! implementation.
//!
//! All operations are synchronous. Read methods take `&self` and are safe
//! to call from multiple threads whenever the engine's reads are; cursors
//! are single-owner and not thread-safe.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod key;
pub mod codec;
pub mod options;
pub mod engine;
pub mod cursor;
pub mod batch;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BridgeError, Result};
pub use config::Config;
pub use key::Key;
pub use codec::{BincodeCodec, IdentityCodec, ValueCodec};
pub use options::{ReadOptions, SnapshotId};
pub use engine::{BatchOp, EngineIterator, MemoryEngine, StorageEngine, WriteBatch};
pub use cursor::{Cursor, Direction};
pub use batch::BatchWriter;
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of keybridge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
