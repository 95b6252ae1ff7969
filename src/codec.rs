//! Value codec
//!
//! Every write passes through `encode` and every read through `decode`, so
//! callers can persist structured values transparently. The key is handed to
//! both directions, which lets a codec pick its behavior per key prefix
//! (e.g. per-namespace typed decoding).
//!
//! ## Round-trip law
//!
//! For every representable value `v` and key `k`:
//! `decode(k, encode(k, v)) == v`

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{BridgeError, Result};
use crate::key::Key;

/// Transforms typed values to and from stored bytes
///
/// Implementations must round-trip: decoding the bytes produced by `encode`
/// under the same key yields an equal value. Decode failures must surface as
/// [`BridgeError::Decode`], never a silently substituted default.
pub trait ValueCodec {
    /// The caller-facing value type
    type Value;

    /// Encode a value to the bytes that will be stored under `key`
    fn encode(&self, key: &Key, value: &Self::Value) -> Result<Bytes>;

    /// Decode stored bytes back into a value
    ///
    /// `key` is the key the bytes were read under, so decoding can be
    /// key-dependent.
    fn decode(&self, key: &Key, bytes: &[u8]) -> Result<Self::Value>;
}

/// Identity codec: raw bytes pass through unchanged
///
/// The default when no codec is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCodec;

impl ValueCodec for IdentityCodec {
    type Value = Bytes;

    fn encode(&self, _key: &Key, value: &Bytes) -> Result<Bytes> {
        Ok(value.clone())
    }

    fn decode(&self, _key: &Key, bytes: &[u8]) -> Result<Bytes> {
        Ok(Bytes::copy_from_slice(bytes))
    }
}

/// Serde-backed codec using bincode's compact binary format
///
/// Stores any `Serialize + DeserializeOwned` type. Bytes that do not parse
/// as a `T` surface as [`BridgeError::Decode`] carrying the offending key.
#[derive(Debug, Clone, Copy)]
pub struct BincodeCodec<T> {
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> BincodeCodec<T> {
    /// Create a codec for values of type `T`
    pub fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> Default for BincodeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize + DeserializeOwned> ValueCodec for BincodeCodec<T> {
    type Value = T;

    fn encode(&self, _key: &Key, value: &T) -> Result<Bytes> {
        let encoded =
            bincode::serialize(value).map_err(|e| BridgeError::Serialization(e.to_string()))?;
        Ok(Bytes::from(encoded))
    }

    fn decode(&self, key: &Key, bytes: &[u8]) -> Result<T> {
        bincode::deserialize(bytes).map_err(|e| BridgeError::Decode {
            key: key.clone(),
            reason: e.to_string(),
        })
    }
}
