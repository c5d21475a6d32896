//! Error types for the stagechain execution engine.

use thiserror::Error;

/// Errors raised while assembling or running a chain.
#[derive(Debug, Error)]
pub enum ChainError {
    /// A transition would nest stage sub-chains deeper than the frame allows.
    #[error("Stage nesting exceeds the maximum depth of {max}")]
    StackOverflow { max: usize },

    /// Parts and behaviors do not line up (bad index or mismatched stages).
    #[error("Misconfigured chain: {0}")]
    Misconfigured(String),

    /// A failure raised by a behavior, surfaced exactly as raised.
    #[error(transparent)]
    Behavior(#[from] anyhow::Error),
}

impl ChainError {
    /// Wraps a behavior's own error type.
    pub fn behavior<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ChainError::Behavior(anyhow::Error::new(err))
    }

    /// Returns the behavior failure as `E`, if that is what was raised.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        match self {
            ChainError::Behavior(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Errors surfaced by the harness around the engine (configuration, logging, CLI).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
