//! Stagechain: Staged Behavior-Chain Execution
//!
//! Runs an ordered chain of middleware-style behaviors over per-invocation state.
//! Stretches of the chain operate in different stages; a transition part runs a
//! nested sub-chain in a new stage to completion before the enclosing chain
//! resumes right after it.

pub mod behavior;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod frame;
pub mod logging;
pub mod part;
pub mod pipeline;
pub mod runner;
pub mod stage;
pub mod trace;

pub use behavior::{Behavior, BehaviorDescriptor, BehaviorList, Next};
pub use context::{Context, Extensions};
pub use error::{ApiError, ChainError};
pub use frame::{Frame, MAX_DEPTH};
pub use part::{Part, PartSequence};
pub use pipeline::Pipeline;
pub use runner::Outcome;
pub use stage::{Stage, StageId};
