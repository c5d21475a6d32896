//! Reference behaviors that record what they observe.
//!
//! These are ordinary collaborators written against the public [`Behavior`]
//! contract. The CLI and the test suite use them to make dispatch order visible.

pub mod scenario;

use crate::behavior::{Behavior, Next};
use crate::context::Context;
use crate::error::ChainError;
use crate::stage::Stage;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;

/// Outermost stage of the demo chains.
#[derive(Debug)]
pub struct Root;

impl Stage for Root {
    const NAME: &'static str = "root";
}

/// Stage entered by the demo transitions.
#[derive(Debug)]
pub struct Nested;

impl Stage for Nested {
    const NAME: &'static str = "nested";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Before,
    After,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Before => f.write_str("before"),
            Phase::After => f.write_str("after"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    pub label: String,
    pub phase: Phase,
    pub stage: &'static str,
    pub depth: usize,
}

impl std::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.label, self.phase)
    }
}

/// Shared, append-only record of trace events.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    events: Arc<Mutex<Vec<TraceEvent>>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<S: Stage>(&self, ctx: &Context<'_, S>, label: &str, phase: Phase) {
        self.events.lock().push(TraceEvent {
            label: label.to_string(),
            phase,
            stage: ctx.stage_name(),
            depth: ctx.depth(),
        });
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().clone()
    }

    /// Events rendered as `"<label>-<phase>"`.
    pub fn labels(&self) -> Vec<String> {
        self.events.lock().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

/// In-stage behavior recording before and after the rest of the chain.
pub struct Traced {
    label: String,
    log: TraceLog,
}

impl Traced {
    pub fn new(label: impl Into<String>, log: &TraceLog) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
        }
    }
}

#[async_trait]
impl<S: Stage> Behavior<S> for Traced {
    async fn invoke(&self, ctx: &mut Context<'_, S>, next: Next<S>) -> Result<(), ChainError> {
        self.log.record(ctx, &self.label, Phase::Before);
        next.call(ctx).await?;
        self.log.record(ctx, &self.label, Phase::After);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Transition behavior deriving the `Out` stage view for its nested sub-chain.
pub struct Enter<Out> {
    label: String,
    log: TraceLog,
    _out: PhantomData<fn() -> Out>,
}

impl<Out: Stage> Enter<Out> {
    pub fn new(label: impl Into<String>, log: &TraceLog) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
            _out: PhantomData,
        }
    }
}

#[async_trait]
impl<In: Stage, Out: Stage> Behavior<In, Out> for Enter<Out> {
    async fn invoke(&self, ctx: &mut Context<'_, In>, next: Next<Out>) -> Result<(), ChainError> {
        self.log.record(ctx, &self.label, Phase::Before);
        next.call(&mut ctx.derive::<Out>()).await?;
        self.log.record(ctx, &self.label, Phase::After);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Numbered in-stage behavior that yields to the runtime before continuing.
pub struct Level {
    label: String,
    log: TraceLog,
}

impl Level {
    pub fn new(level: usize, log: &TraceLog) -> Self {
        Self {
            label: format!("level-{}", level),
            log: log.clone(),
        }
    }
}

#[async_trait]
impl<S: Stage> Behavior<S> for Level {
    async fn invoke(&self, ctx: &mut Context<'_, S>, next: Next<S>) -> Result<(), ChainError> {
        self.log.record(ctx, &self.label, Phase::Before);
        tokio::task::yield_now().await;
        next.call(ctx).await?;
        self.log.record(ctx, &self.label, Phase::After);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Failure raised by [`Fail`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Behavior '{label}' failed")]
pub struct TraceFailure {
    pub label: String,
}

/// Behavior that raises [`TraceFailure`] instead of continuing.
pub struct Fail {
    label: String,
    log: TraceLog,
}

impl Fail {
    pub fn new(label: impl Into<String>, log: &TraceLog) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
        }
    }
}

#[async_trait]
impl<S: Stage> Behavior<S> for Fail {
    async fn invoke(&self, ctx: &mut Context<'_, S>, _next: Next<S>) -> Result<(), ChainError> {
        self.log.record(ctx, &self.label, Phase::Before);
        Err(ChainError::behavior(TraceFailure {
            label: self.label.clone(),
        }))
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Behavior that ends the invocation without calling `next`.
pub struct Halt {
    label: String,
    log: TraceLog,
}

impl Halt {
    pub fn new(label: impl Into<String>, log: &TraceLog) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
        }
    }
}

#[async_trait]
impl<S: Stage> Behavior<S> for Halt {
    async fn invoke(&self, ctx: &mut Context<'_, S>, _next: Next<S>) -> Result<(), ChainError> {
        self.log.record(ctx, &self.label, Phase::Before);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.label
    }
}
