//! Configuration System
//!
//! Layered configuration for the `stagechain` demo runner. Sources, lowest
//! precedence first: built-in defaults, the global file, `stagechain.toml` in the
//! working directory, an explicit file, then `STAGECHAIN__*` environment variables.
//! CLI flags are applied on top by the binary.
//!
//! The frame's maximum nesting depth is deliberately absent: it is a fixed constant
//! ([`crate::frame::MAX_DEPTH`]).

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge_policy;
mod sources;

pub use sources::local_file::LOCAL_CONFIG_FILE;

/// Upper bound on demo chain length; each level adds a nested future.
pub const MAX_DEMO_LEVELS: usize = 1024;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StagechainConfig {
    /// Demo chain shapes
    #[serde(default)]
    pub demo: DemoConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Shape of the demo chains run by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Number of level behaviors in the `depth` chain
    #[serde(default = "default_levels")]
    pub levels: usize,

    /// Append a failing behavior to the `depth` chain
    #[serde(default)]
    pub fail: bool,

    /// Number of nested transitions in the `nest` chain
    #[serde(default = "default_nesting")]
    pub nesting: usize,

    /// Behaviors in the innermost sub-chain of the `nest` chain
    #[serde(default = "default_child_len")]
    pub child_len: usize,
}

fn default_levels() -> usize {
    20
}

fn default_nesting() -> usize {
    3
}

fn default_child_len() -> usize {
    1
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            fail: false,
            nesting: default_nesting(),
            child_len: default_child_len(),
        }
    }
}

impl DemoConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.levels > MAX_DEMO_LEVELS {
            return Err(format!(
                "levels must be at most {} (got {})",
                MAX_DEMO_LEVELS, self.levels
            ));
        }
        if self.nesting > MAX_DEMO_LEVELS {
            return Err(format!(
                "nesting must be at most {} (got {})",
                MAX_DEMO_LEVELS, self.nesting
            ));
        }
        if self.child_len > MAX_DEMO_LEVELS {
            return Err(format!(
                "child_len must be at most {} (got {})",
                MAX_DEMO_LEVELS, self.child_len
            ));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Demo(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Demo(msg) => write!(f, "Demo: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl StagechainConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.demo.validate() {
            errors.push(ValidationError::Demo(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`StagechainConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, the global file, `dir/stagechain.toml` and the environment.
    pub fn load(dir: &Path) -> Result<StagechainConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::local_file::add_to_builder(builder, dir)?;
        Self::finish(builder)
    }

    /// Load from defaults and `path` (which must exist), then the environment.
    pub fn load_from_file(path: &Path) -> Result<StagechainConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        Self::finish(builder)
    }

    /// Path of the global configuration file, if a home directory is known.
    pub fn xdg_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<StagechainConfig, ApiError> {
        let config: StagechainConfig = builder
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()?;

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(config)
    }
}
