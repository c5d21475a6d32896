//! Behavior authoring contract and the shared behavior list.
//!
//! A behavior is a middleware unit that runs in an input stage and hands an
//! output-stage context to its continuation. In-stage behaviors have identical
//! input and output stages; transition behaviors derive a new stage view and pass
//! it on.
//!
//! Behaviors are stored type-erased behind their input stage and resolved by a
//! checked downcast, so a chain whose stages do not line up fails with
//! [`ChainError::Misconfigured`] instead of misbehaving.

use crate::context::Context;
use crate::error::ChainError;
use crate::part::PartSequence;
use crate::runner;
use crate::stage::{Stage, StageId};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

/// Middleware unit running logic around the remainder of the chain.
///
/// An implementation may:
/// - do work, then call `next` once, then optionally do more work (onion order);
/// - build an `Out` context with [`Context::derive`] when `In` and `Out` differ;
/// - return without calling `next`, which ends the invocation early without error;
/// - return an error, which propagates unchanged to the caller of the chain.
///
/// `next` is consumed by [`Next::call`], so it cannot be called twice.
#[async_trait]
pub trait Behavior<In: Stage, Out: Stage = In>: Send + Sync + 'static {
    async fn invoke(&self, ctx: &mut Context<'_, In>, next: Next<Out>) -> Result<(), ChainError>;

    /// Name used in diagnostics. Defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// What the runner does when a behavior's continuation is called.
#[derive(Debug, Clone)]
pub(crate) enum Resume {
    /// Advance to the following part of the current sequence.
    Advance,
    /// Drive a nested child sequence from its first part.
    Enter(PartSequence),
}

/// Single-use continuation handed to a behavior.
pub struct Next<S> {
    resume: Resume,
    _stage: PhantomData<fn(S)>,
}

impl<S: Stage> Next<S> {
    pub(crate) fn new(resume: Resume) -> Self {
        Self {
            resume,
            _stage: PhantomData,
        }
    }

    /// Runs the rest of the chain with `ctx`.
    pub fn call<'a>(self, ctx: &'a mut Context<'_, S>) -> BoxFuture<'a, Result<(), ChainError>> {
        match self.resume {
            Resume::Advance => runner::next(ctx),
            Resume::Enter(children) => runner::start(ctx, children),
        }
    }
}

impl<S: Stage> std::fmt::Debug for Next<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("stage", &S::NAME)
            .field("resume", &self.resume)
            .finish()
    }
}

/// Behavior with its output stage erased, invocable from its input stage.
pub(crate) trait ErasedBehavior<In: Stage>: Send + Sync {
    fn invoke<'a, 'c>(
        &'a self,
        ctx: &'a mut Context<'c, In>,
        resume: Resume,
    ) -> BoxFuture<'a, Result<(), ChainError>>;
}

struct Bound<B: ?Sized, In, Out> {
    behavior: Arc<B>,
    _stages: PhantomData<fn(In) -> Out>,
}

impl<B, In, Out> ErasedBehavior<In> for Bound<B, In, Out>
where
    B: Behavior<In, Out> + ?Sized,
    In: Stage,
    Out: Stage,
{
    fn invoke<'a, 'c>(
        &'a self,
        ctx: &'a mut Context<'c, In>,
        resume: Resume,
    ) -> BoxFuture<'a, Result<(), ChainError>> {
        Behavior::<In, Out>::invoke(&*self.behavior, ctx, Next::new(resume))
    }
}

/// Registration record of one behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorDescriptor {
    pub name: String,
    pub input: StageId,
    pub output: StageId,
}

impl BehaviorDescriptor {
    pub fn is_transition(&self) -> bool {
        self.input != self.output
    }
}

struct Entry {
    descriptor: BehaviorDescriptor,
    // Holds an `Arc<dyn ErasedBehavior<In>>` for the entry's input stage.
    erased: Box<dyn Any + Send + Sync>,
}

/// Index-stable list of behavior instances shared by every invocation of a chain.
#[derive(Default)]
pub struct BehaviorList {
    entries: Vec<Entry>,
}

impl BehaviorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `behavior` and returns its index.
    pub fn push<In, Out, B>(&mut self, behavior: B) -> usize
    where
        In: Stage,
        Out: Stage,
        B: Behavior<In, Out>,
    {
        self.push_shared::<In, Out, B>(Arc::new(behavior))
    }

    /// Registers an instance that is already shared elsewhere.
    pub fn push_shared<In, Out, B>(&mut self, behavior: Arc<B>) -> usize
    where
        In: Stage,
        Out: Stage,
        B: Behavior<In, Out> + ?Sized,
    {
        let descriptor = BehaviorDescriptor {
            name: behavior.name().to_string(),
            input: StageId::of::<In>(),
            output: StageId::of::<Out>(),
        };
        let erased: Arc<dyn ErasedBehavior<In>> = Arc::new(Bound::<B, In, Out> {
            behavior,
            _stages: PhantomData,
        });
        self.entries.push(Entry {
            descriptor,
            erased: Box::new(erased),
        });
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn describe(&self, index: usize) -> Option<&BehaviorDescriptor> {
        self.entries.get(index).map(|entry| &entry.descriptor)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &BehaviorDescriptor> {
        self.entries.iter().map(|entry| &entry.descriptor)
    }

    pub(crate) fn resolve<In: Stage>(
        &self,
        index: usize,
    ) -> Result<&Arc<dyn ErasedBehavior<In>>, ChainError> {
        let entry = self.entries.get(index).ok_or_else(|| {
            ChainError::Misconfigured(format!(
                "behavior {} is not registered ({} behaviors)",
                index,
                self.entries.len()
            ))
        })?;
        entry
            .erased
            .downcast_ref::<Arc<dyn ErasedBehavior<In>>>()
            .ok_or_else(|| {
                ChainError::Misconfigured(format!(
                    "behavior {} ('{}') runs in stage '{}', not '{}'",
                    index,
                    entry.descriptor.name,
                    entry.descriptor.input,
                    In::NAME
                ))
            })
    }
}

impl std::fmt::Debug for BehaviorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.descriptors()).finish()
    }
}
