//! Error types for keybridge
//!
//! Provides a unified error type for all bridge operations.

use thiserror::Error;

use crate::key::Key;

/// Result type alias using BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Unified error type for bridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("invalid key type tag: {0:#04x}")]
    InvalidKeyType(u8),

    #[error("key bytes are not valid UTF-8 text")]
    Encoding,

    // -------------------------------------------------------------------------
    // Value Codec Errors
    // -------------------------------------------------------------------------
    #[error("failed to decode value for key {key:?}: {reason}")]
    Decode { key: Key, reason: String },

    #[error("failed to encode value: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Cursor Errors
    // -------------------------------------------------------------------------
    #[error("cursor is not positioned on an entry")]
    CursorNotPositioned,

    // -------------------------------------------------------------------------
    // Batch Errors
    // -------------------------------------------------------------------------
    #[error("write batch was already committed")]
    BatchAlreadyCommitted,

    // -------------------------------------------------------------------------
    // Engine Errors
    // -------------------------------------------------------------------------
    #[error("storage engine error: {0}")]
    Engine(String),
}
