//! Compiled chain and the invocation entry point.

use crate::behavior::BehaviorList;
use crate::context::{Context, Extensions};
use crate::error::ChainError;
use crate::frame::Frame;
use crate::part::{self, PartSequence};
use crate::runner::{self, Outcome};
use crate::stage::{Stage, StageId};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A validated behavior list and root part sequence, rooted in stage `S`.
///
/// A pipeline is immutable and cheap to clone; any number of invocations may run
/// concurrently, each with its own [`Frame`].
pub struct Pipeline<S> {
    behaviors: Arc<BehaviorList>,
    parts: PartSequence,
    _stage: PhantomData<fn() -> S>,
}

impl<S: Stage> Pipeline<S> {
    /// Binds `parts` to `behaviors`, rejecting parts that reference unknown
    /// behaviors or whose stages do not line up.
    pub fn new(
        behaviors: impl Into<Arc<BehaviorList>>,
        parts: impl Into<PartSequence>,
    ) -> Result<Self, ChainError> {
        let behaviors = behaviors.into();
        let parts = parts.into();
        part::validate(&parts, StageId::of::<S>(), &behaviors)?;
        debug!(
            stage = S::NAME,
            behaviors = behaviors.len(),
            parts = parts.len(),
            "Pipeline assembled"
        );
        Ok(Self {
            behaviors,
            parts,
            _stage: PhantomData,
        })
    }

    pub fn behaviors(&self) -> &BehaviorList {
        &self.behaviors
    }

    pub fn parts(&self) -> &PartSequence {
        &self.parts
    }

    /// Runs the chain once with fresh per-invocation state.
    pub async fn invoke(&self) -> Result<Outcome, ChainError> {
        let mut extensions = Extensions::new();
        self.invoke_with(&mut extensions).await
    }

    /// Runs the chain once, sharing `extensions` with every stage view.
    ///
    /// Behavior failures are returned exactly as raised; side effects of behaviors
    /// that already ran are not rolled back.
    ///
    /// Chain length is not bounded. Every dispatched part nests one more boxed
    /// future inside the previous one, so polling uses stack in proportion to the
    /// number of parts reached: a debug build overflows a 2 MiB tokio worker stack
    /// at roughly a thousand parts, while release builds go several times further.
    /// Very long chains need a larger thread stack
    /// (`tokio::runtime::Builder::thread_stack_size`).
    #[instrument(skip(self, extensions), fields(stage = S::NAME, parts = self.parts.len()))]
    pub async fn invoke_with(&self, extensions: &mut Extensions) -> Result<Outcome, ChainError> {
        let mut frame = Frame::new();
        let result = {
            let mut ctx = Context::<S>::root(&self.behaviors, &mut frame, extensions);
            runner::start(&mut ctx, Arc::clone(&self.parts)).await
        };

        match result {
            Ok(()) => {
                let outcome = Outcome::of(&frame);
                debug!(?outcome, "Invocation finished");
                Ok(outcome)
            }
            Err(err) => {
                debug!(error = %err, "Invocation failed");
                Err(err)
            }
        }
    }
}

impl<S> Clone for Pipeline<S> {
    fn clone(&self) -> Self {
        Self {
            behaviors: Arc::clone(&self.behaviors),
            parts: Arc::clone(&self.parts),
            _stage: PhantomData,
        }
    }
}

impl<S: Stage> std::fmt::Debug for Pipeline<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stage", &S::NAME)
            .field("behaviors", &self.behaviors)
            .field("parts", &self.parts)
            .finish()
    }
}
