//! Stage markers.
//!
//! A stage is a zero-sized type naming a phase of processing. It carries no data;
//! it only tags a [`Context`](crate::context::Context) so that behaviors written for
//! one phase cannot be handed a context from another. Stage-specific capabilities
//! are added by collaborators through inherent `impl Context<'_, MyStage>` blocks
//! or extension traits.

use std::any::TypeId;

/// Capability marker for a phase of a chain.
pub trait Stage: Send + Sync + 'static {
    /// Human-readable stage name, used in diagnostics and logs.
    const NAME: &'static str;
}

/// Runtime identity of a stage, recorded for every registered behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageId {
    type_id: TypeId,
    name: &'static str,
}

impl StageId {
    pub fn of<S: Stage>() -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            name: S::NAME,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}
