//! Compiled chain entries.
//!
//! A part binds one position of a chain to a behavior index. Parts carry no
//! per-invocation state, so a compiled sequence is shared by every invocation of
//! the chain.

use crate::behavior::BehaviorList;
use crate::error::ChainError;
use crate::stage::StageId;
use std::sync::Arc;

/// Immutable, shareable sequence of parts.
pub type PartSequence = Arc<[Part]>;

#[derive(Debug, Clone)]
pub enum Part {
    /// Runs an in-stage behavior and continues with the following part.
    Simple { behavior: usize },
    /// Runs a transition behavior whose continuation drives `children` in the
    /// behavior's output stage before the enclosing sequence resumes.
    Transition {
        behavior: usize,
        children: PartSequence,
    },
}

impl Part {
    pub fn simple(behavior: usize) -> Self {
        Part::Simple { behavior }
    }

    pub fn transition(behavior: usize, children: impl Into<PartSequence>) -> Self {
        Part::Transition {
            behavior,
            children: children.into(),
        }
    }

    /// Index of the bound behavior in the [`BehaviorList`].
    pub fn behavior(&self) -> usize {
        match self {
            Part::Simple { behavior } | Part::Transition { behavior, .. } => *behavior,
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Part::Transition { .. })
    }
}

/// Checks that every part of `parts` (recursively) is bound to an existing behavior
/// whose stages agree with the stage flowing into it.
///
/// Nesting depth is not checked here; it is enforced while running.
pub(crate) fn validate(
    parts: &[Part],
    stage: StageId,
    behaviors: &BehaviorList,
) -> Result<(), ChainError> {
    for (position, part) in parts.iter().enumerate() {
        let index = part.behavior();
        let descriptor = behaviors.describe(index).ok_or_else(|| {
            ChainError::Misconfigured(format!(
                "part {} references behavior {} but only {} are registered",
                position,
                index,
                behaviors.len()
            ))
        })?;

        if descriptor.input != stage {
            return Err(ChainError::Misconfigured(format!(
                "part {} binds '{}' which runs in stage '{}' but the chain is in stage '{}'",
                position, descriptor.name, descriptor.input, stage
            )));
        }

        match part {
            Part::Simple { .. } => {
                if descriptor.output != descriptor.input {
                    return Err(ChainError::Misconfigured(format!(
                        "part {} is simple but '{}' transitions from '{}' to '{}'",
                        position, descriptor.name, descriptor.input, descriptor.output
                    )));
                }
            }
            Part::Transition { children, .. } => {
                validate(children, descriptor.output, behaviors)?;
            }
        }
    }
    Ok(())
}
