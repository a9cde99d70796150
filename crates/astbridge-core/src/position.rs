//! Packed source positions.
//!
//! The host model stores a range as a single 64-bit value: the start offset
//! in the high 32 bits and the inclusive end offset in the low 32 bits.
//! Synthesized nodes, which have no text in the source file, carry
//! [`Position::NON_EXISTENT`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A packed `(start, end)` byte range; `end` is inclusive.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(i64);

impl Position {
    /// Range of a node that has no textual representation.
    ///
    /// The host derives a length as `end - start + 1`, so a start of `-1`
    /// needs an end of `-2` to come out as zero.
    pub const NON_EXISTENT: Position = Position::new(-1, -2);

    /// Pack `start` and `end` without any adjustment.
    pub const fn new(start: i32, end: i32) -> Self {
        Self(((start as i64) << 32) | (end as u32 as i64))
    }

    /// Pack a range reported by the front-end.
    ///
    /// The front-end reports `(0, <=0)` for nodes it invented, which maps to
    /// the sentinel.
    pub const fn spanning(start: i32, end: i32) -> Self {
        if start == 0 && end <= 0 {
            Self::NON_EXISTENT
        } else {
            Self::new(start, end)
        }
    }

    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    pub const fn start(self) -> i32 {
        (self.0 >> 32) as i32
    }

    pub const fn end(self) -> i32 {
        self.0 as i32
    }

    pub const fn is_non_existent(self) -> bool {
        self.0 == Self::NON_EXISTENT.0
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_non_existent() {
            write!(f, "Position(<none>)")
        } else {
            write!(f, "Position({}..={})", self.start(), self.end())
        }
    }
}

/// Apportion the range `start..end` over the segments of a dotted name.
///
/// Segments are laid out left to right: each one covers `len - 1` bytes past
/// its start and is followed by a one-byte separator. Only the starting
/// offset is trusted; `end` is frequently wrong for references such as
/// `java.util.List[]`, so it merely gates whether layout is attempted.
///
/// When `start >= end` (the front-end sometimes reports this for types it
/// converted from `def`), every segment receives the empty range
/// `(start, start)` instead.
pub fn positions_for<S: AsRef<str>>(segments: &[S], start: i32, end: i32) -> Vec<Position> {
    if start < end {
        let mut pos = start;
        segments
            .iter()
            .map(|segment| {
                let segment_start = pos;
                pos = pos + segment.as_ref().len() as i32 - 1;
                let position = Position::new(segment_start, pos);
                // onto the separator, then past it
                pos += 2;
                position
            })
            .collect()
    } else {
        vec![Position::new(start, start); segments.len()]
    }
}

/// Split a dotted name into its segments.
pub fn split_dotted(name: &str) -> Vec<String> {
    name.split('.').map(str::to_owned).collect()
}
