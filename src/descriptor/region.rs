//! Addressed regions of the reference sequence
//!
//! Descriptors address either a single 1-based position or an inclusive
//! 1-based range. Conversion to 0-based internal indices happens in exactly
//! one place, [`Region::resolve`], so that bounds and ordering are validated
//! uniformly before any edit is dispatched.

use crate::error::MutSeqError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The portion of the reference sequence a descriptor addresses (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// A single position (e.g., `c.3del`)
    Single(u64),
    /// An inclusive range (e.g., `c.3_6del`)
    Range { start: u64, end: u64 },
}

impl Region {
    /// Create a single-position region
    pub fn point(pos: u64) -> Self {
        Region::Single(pos)
    }

    /// Create a range region
    pub fn range(start: u64, end: u64) -> Self {
        Region::Range { start, end }
    }

    /// First addressed position (1-based)
    pub fn start(&self) -> u64 {
        match self {
            Region::Single(pos) => *pos,
            Region::Range { start, .. } => *start,
        }
    }

    /// Last addressed position (1-based)
    pub fn end(&self) -> u64 {
        match self {
            Region::Single(pos) => *pos,
            Region::Range { end, .. } => *end,
        }
    }

    /// Check if this region addresses a single position
    pub fn is_single(&self) -> bool {
        matches!(self, Region::Single(_))
    }

    /// Number of addressed positions, when the range is well-formed
    pub fn len(&self) -> u64 {
        match self {
            Region::Single(_) => 1,
            Region::Range { start, end } => {
                if end >= start {
                    end - start + 1
                } else {
                    0
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve to 0-based inclusive indices into a sequence of `seq_len` symbols.
    ///
    /// Fails with a descriptive error when a position is 0 or beyond the end
    /// of the sequence, or when a range has start after end. Out-of-range
    /// positions are never silently clipped.
    pub fn resolve(&self, seq_len: usize) -> Result<(usize, usize), MutSeqError> {
        let (start, end) = (self.start(), self.end());

        for pos in [start, end] {
            if pos == 0 || pos > seq_len as u64 {
                return Err(MutSeqError::PositionOutOfBounds { pos, len: seq_len });
            }
        }

        if start > end {
            return Err(MutSeqError::InvalidRange { start, end });
        }

        Ok(((start - 1) as usize, (end - 1) as usize))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Single(pos) => write!(f, "{}", pos),
            Region::Range { start, end } => write!(f, "{}_{}", start, end),
        }
    }
}
