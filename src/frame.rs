//! Execution frame: the single mutable cursor of one invocation.
//!
//! A frame tracks the part sequence currently being driven, the index of the part
//! being invoked, and a bounded stack of snapshots recording where each paused
//! outer sequence resumes once a nested stage sub-chain is exhausted.
//!
//! The snapshot stack is a fixed inline buffer; pushing onto a full stack fails
//! with [`ChainError::StackOverflow`] instead of growing or truncating.

use crate::error::ChainError;
use crate::part::{Part, PartSequence};
use std::sync::Arc;

/// Maximum number of nested stage sub-chains a single invocation may have open.
///
/// This is a fixed system constant shared with whoever compiles chains; it is not
/// configurable.
pub const MAX_DEPTH: usize = 8;

/// Saved cursor of a paused outer sequence.
#[derive(Debug, Clone)]
pub struct Snapshot {
    parts: PartSequence,
    index: usize,
}

impl Snapshot {
    pub fn index(&self) -> usize {
        self.index
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.parts.len()
    }
}

/// Per-invocation cursor shared by every stage view of that invocation.
#[derive(Debug)]
pub struct Frame {
    parts: PartSequence,
    index: usize,
    stack: [Option<Snapshot>; MAX_DEPTH],
    depth: usize,
    finished: bool,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    pub fn new() -> Self {
        Self {
            parts: Arc::from(Vec::<Part>::new()),
            index: 0,
            stack: Default::default(),
            depth: 0,
            finished: false,
        }
    }

    /// Number of snapshots currently saved.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Index of the part being driven in the current sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// True once the root sequence has been exhausted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn install(&mut self, parts: PartSequence) {
        self.parts = parts;
        self.index = 0;
    }

    pub(crate) fn current(&self) -> Option<&Part> {
        self.parts.get(self.index)
    }

    /// Moves to the following part; returns false when the sequence is exhausted.
    pub(crate) fn advance(&mut self) -> bool {
        self.index += 1;
        self.index < self.parts.len()
    }

    pub(crate) fn push(&mut self) -> Result<(), ChainError> {
        if self.depth == MAX_DEPTH {
            return Err(ChainError::StackOverflow { max: MAX_DEPTH });
        }
        self.stack[self.depth] = Some(Snapshot {
            parts: Arc::clone(&self.parts),
            index: self.index,
        });
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Option<Snapshot> {
        if self.depth == 0 {
            return None;
        }
        self.depth -= 1;
        self.stack[self.depth].take()
    }

    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.parts = snapshot.parts;
        self.index = snapshot.index;
    }

    pub(crate) fn finish(&mut self) {
        self.finished = true;
    }
}
