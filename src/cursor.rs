//! Cursor walking
//!
//! A [`Cursor`] wraps one engine iterator, positions it at a start key (or
//! at the first/last key if none is given), and steps it in a direction
//! fixed at creation, exposing the current entry as a decoded key/value
//! pair. It produces a lazy, single-pass, non-restartable sequence.
//!
//! ## State machine
//!
//! ```text
//! open ──▶ Positioned ──advance──▶ Positioned
//!              │  │                    │
//!              │  └─── engine fault ──▶ Invalid
//!              ▼
//!          Exhausted ◀── no further key / crossed bound
//! ```
//!
//! Dropping a cursor releases the underlying engine iterator on every exit
//! path (normal exhaustion, early abandonment, or error).

use tracing::trace;

use crate::codec::ValueCodec;
use crate::engine::EngineIterator;
use crate::error::{BridgeError, Result};
use crate::key::Key;

/// Walk direction, fixed when the cursor is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending key order
    Forward,

    /// Descending key order
    Backward,
}

/// Cursor lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    /// On an entry; `current` is readable
    Positioned,

    /// Walked off the end (or past the bound); terminal
    Exhausted,

    /// Engine fault mid-walk; terminal
    Invalid,
}

/// A positioned walk over stored entries
///
/// Owns its engine iterator exclusively. Not thread-safe: single owner,
/// sequential use. Values pass through the store's [`ValueCodec`] on read.
pub struct Cursor<'a, C: ValueCodec> {
    iter: Box<dyn EngineIterator>,
    codec: &'a C,
    direction: Direction,
    end_bound: Option<Vec<u8>>,
    prefer_text_keys: bool,
    state: CursorState,
    pending_fault: Option<BridgeError>,
}

impl<'a, C: ValueCodec> Cursor<'a, C> {
    /// Open a cursor and position it
    ///
    /// Positioning rule: with a start key, seek to the first stored key
    /// >= start; a backward walk treats the landed position as the point
    /// to step backward from, falling back to the last key when the seek
    /// runs off the end. Without a start key, position at the first key
    /// (forward) or the last key (backward). An empty store opens the
    /// cursor directly in the exhausted state.
    pub(crate) fn open(
        mut iter: Box<dyn EngineIterator>,
        codec: &'a C,
        direction: Direction,
        start: Option<&Key>,
        end: Option<&Key>,
        prefer_text_keys: bool,
    ) -> Result<Self> {
        match start {
            Some(key) => {
                iter.seek(key.as_span())?;
                if direction == Direction::Backward && !iter.valid() {
                    // Start key is past the last entry; a backward walk
                    // begins at the end of the store
                    iter.seek_to_last()?;
                }
            }
            None => match direction {
                Direction::Forward => iter.seek_to_first()?,
                Direction::Backward => iter.seek_to_last()?,
            },
        }

        let mut cursor = Self {
            iter,
            codec,
            direction,
            end_bound: end.map(|key| key.as_span().to_vec()),
            prefer_text_keys,
            state: CursorState::Positioned,
            pending_fault: None,
        };

        if !cursor.iter.valid() || !cursor.within_bound() {
            cursor.state = CursorState::Exhausted;
        }

        trace!(
            direction = ?direction,
            positioned = cursor.is_positioned(),
            "cursor opened"
        );
        Ok(cursor)
    }

    /// The decoded entry at the current position
    ///
    /// Fails with [`BridgeError::CursorNotPositioned`] unless the cursor is
    /// on an entry. A value decode failure surfaces as
    /// [`BridgeError::Decode`] and leaves the cursor positioned at the
    /// offending key, so the caller can skip past it or abort.
    pub fn current(&self) -> Result<(Key, C::Value)> {
        if self.state != CursorState::Positioned {
            return Err(BridgeError::CursorNotPositioned);
        }

        let key = Key::from_span(self.iter.key(), self.prefer_text_keys)?;
        let value = self.codec.decode(&key, self.iter.value())?;
        Ok((key, value))
    }

    /// Step one entry in the cursor's fixed direction
    ///
    /// Transitions to exhausted when no further key exists or the end
    /// bound is crossed; once exhausted (or invalidated), repeated calls
    /// are no-ops. An engine fault mid-step invalidates the cursor and is
    /// returned to the caller.
    pub fn advance(&mut self) -> Result<()> {
        if self.state != CursorState::Positioned {
            return Ok(());
        }

        let step = match self.direction {
            Direction::Forward => self.iter.next(),
            Direction::Backward => self.iter.prev(),
        };
        if let Err(fault) = step {
            self.state = CursorState::Invalid;
            return Err(fault);
        }

        if !self.iter.valid() || !self.within_bound() {
            self.state = CursorState::Exhausted;
        }
        Ok(())
    }

    /// Whether the cursor is on a readable entry
    pub fn is_positioned(&self) -> bool {
        self.state == CursorState::Positioned
    }

    /// Whether the walk has ended normally
    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted
    }

    /// The walk direction fixed at creation
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the current entry is inside the optional end bound
    /// (inclusive)
    fn within_bound(&self) -> bool {
        let Some(bound) = self.end_bound.as_deref() else {
            return true;
        };
        match self.direction {
            Direction::Forward => self.iter.key() <= bound,
            Direction::Backward => self.iter.key() >= bound,
        }
    }
}

impl<'a, C: ValueCodec> Iterator for Cursor<'a, C> {
    type Item = Result<(Key, C::Value)>;

    /// Lazily yield decoded entries until exhaustion
    ///
    /// A decode failure is yielded as an `Err` item; the cursor has
    /// already stepped past the offending key, so the following pull
    /// resumes with the next entry. An engine fault is yielded on the
    /// pull after the entry it interrupted, then the sequence ends.
    fn next(&mut self) -> Option<Self::Item> {
        if let Some(fault) = self.pending_fault.take() {
            return Some(Err(fault));
        }
        if self.state != CursorState::Positioned {
            return None;
        }

        let item = self.current();
        if let Err(fault) = self.advance() {
            self.pending_fault = Some(fault);
        }
        Some(item)
    }
}
