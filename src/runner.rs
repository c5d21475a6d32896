//! Dispatch trampoline.
//!
//! `start` installs a sequence and invokes its first part, `next` advances to the
//! following part, and `complete` runs whenever a sequence is exhausted. A
//! transition part saves the enclosing cursor before its behavior runs; when the
//! nested sequence is exhausted `complete` restores that cursor, and the
//! transition part advances the enclosing sequence once its behavior returns.
//!
//! A behavior that never calls its continuation leaves the frame where it is:
//! no further part runs and the invocation ends as [`Outcome::Halted`].

use crate::behavior::{BehaviorList, Resume};
use crate::context::Context;
use crate::error::ChainError;
use crate::frame::{Frame, MAX_DEPTH};
use crate::part::{Part, PartSequence};
use crate::stage::Stage;
use futures::future::BoxFuture;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every part of the root sequence ran and called its continuation.
    Completed,
    /// A behavior declined to call its continuation.
    Halted,
}

impl Outcome {
    pub(crate) fn of(frame: &Frame) -> Self {
        if frame.is_finished() {
            Outcome::Completed
        } else {
            Outcome::Halted
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// Installs `parts` at index 0 and drives them from the first part.
pub(crate) fn start<'a, 'c, S: Stage>(
    ctx: &'a mut Context<'c, S>,
    parts: PartSequence,
) -> BoxFuture<'a, Result<(), ChainError>> {
    Box::pin(async move {
        ctx.frame_mut().install(parts);
        if ctx.frame().current().is_none() {
            complete(ctx);
            return Ok(());
        }
        dispatch(ctx).await
    })
}

/// Advances the current sequence and invokes the following part.
pub(crate) fn next<'a, 'c, S: Stage>(
    ctx: &'a mut Context<'c, S>,
) -> BoxFuture<'a, Result<(), ChainError>> {
    Box::pin(async move {
        if ctx.frame_mut().advance() {
            dispatch(ctx).await
        } else {
            complete(ctx);
            Ok(())
        }
    })
}

fn complete<S: Stage>(ctx: &mut Context<'_, S>) {
    let frame = ctx.frame_mut();
    match frame.pop() {
        Some(snapshot) => {
            debug!(
                stage = S::NAME,
                depth = frame.depth(),
                resume_after = snapshot.index(),
                "Stage sub-chain exhausted"
            );
            frame.restore(snapshot);
        }
        None => {
            frame.finish();
            debug!(stage = S::NAME, "Chain exhausted");
        }
    }
}

async fn dispatch<'c, S: Stage>(ctx: &mut Context<'c, S>) -> Result<(), ChainError> {
    let behaviors = ctx.behaviors();
    let part = ctx
        .frame()
        .current()
        .cloned()
        .ok_or_else(|| ChainError::Misconfigured("no part at the current cursor".to_string()))?;
    let index = part.behavior();
    let behavior = behaviors.resolve::<S>(index)?;

    trace!(
        stage = S::NAME,
        position = ctx.frame().index(),
        behavior = index,
        depth = ctx.frame().depth(),
        "Dispatching part"
    );

    match part {
        Part::Simple { .. } => behavior.invoke(ctx, Resume::Advance).await,
        Part::Transition { children, .. } => {
            let depth = ctx.frame().depth();
            if let Err(err) = ctx.frame_mut().push() {
                warn!(
                    stage = S::NAME,
                    behavior = behavior_name(behaviors, index),
                    max_depth = MAX_DEPTH,
                    "Stage nesting too deep"
                );
                return Err(err);
            }
            debug!(
                stage = S::NAME,
                depth = depth + 1,
                children = children.len(),
                "Entering stage sub-chain"
            );

            behavior.invoke(ctx, Resume::Enter(children)).await?;

            // The snapshot is popped only when the nested sequence ran to its end.
            if ctx.frame().depth() == depth {
                next(ctx).await
            } else {
                trace!(stage = S::NAME, depth, "Stage sub-chain halted");
                Ok(())
            }
        }
    }
}

fn behavior_name(behaviors: &BehaviorList, index: usize) -> &str {
    behaviors
        .describe(index)
        .map(|descriptor| descriptor.name.as_str())
        .unwrap_or("<unregistered>")
}
