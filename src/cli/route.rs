//! CLI route: single route table and run context. Builds the demo chain for a
//! command, runs it on a tokio runtime and collects the trace.

use crate::cli::parse::Commands;
use crate::cli::presentation::{CommandOutput, RunReport};
use crate::config::{ConfigLoader, DemoConfig, StagechainConfig};
use crate::error::ApiError;
use crate::trace::{scenario, TraceLog};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Worker stack size; a chain of `MAX_DEMO_LEVELS` parts fits with room to spare
/// in debug builds.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Runtime context for CLI execution: the loaded configuration.
/// Built from a directory and optional config path using ConfigLoader only.
pub struct RunContext {
    config: StagechainConfig,
}

impl RunContext {
    pub fn new(dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&dir)?
        };
        Ok(Self { config })
    }

    pub fn from_config(config: StagechainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StagechainConfig {
        &self.config
    }

    /// Runs the chain named by `command`. Failures raised while the chain runs
    /// are part of the report; only assembly and setup problems are errors.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        validate_format(command.format())?;

        let demo = self.demo_for(command);
        demo.validate().map_err(ApiError::InvalidArgument)?;

        let log = TraceLog::new();
        let pipeline = match command {
            Commands::Config { .. } => return Ok(CommandOutput::Config(self.config.clone())),
            Commands::Trace { .. } => scenario::staged(&log)?,
            Commands::Depth { .. } => scenario::depth(demo.levels, demo.fail, &log)?,
            Commands::Nest { .. } => scenario::nesting(demo.nesting, demo.child_len, &log)?,
            Commands::Halt { .. } => scenario::halting(&log)?,
        };
        debug!(
            command = command.name(),
            behaviors = pipeline.behaviors().len(),
            "Demo chain assembled"
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_stack_size(WORKER_STACK_SIZE)
            .build()?;
        let started_at = chrono::Utc::now().to_rfc3339();
        // Spawned so the chain is polled on a worker thread, not the caller's stack.
        let task = runtime.spawn(async move { pipeline.invoke().await });
        let result = runtime.block_on(task).map_err(|e| {
            ApiError::Runtime(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Chain task did not finish: {}", e),
            ))
        })?;

        let (outcome, error) = match result {
            Ok(outcome) => {
                info!(command = command.name(), ?outcome, "Chain finished");
                (Some(outcome), None)
            }
            Err(e) => {
                warn!(command = command.name(), error = %e, "Chain failed");
                (None, Some(e.to_string()))
            }
        };

        Ok(CommandOutput::Report(RunReport {
            scenario: command.name().to_string(),
            started_at,
            outcome,
            error,
            events: log.events(),
        }))
    }

    /// Demo settings from configuration with command flags applied on top.
    fn demo_for(&self, command: &Commands) -> DemoConfig {
        let mut demo = self.config.demo.clone();
        match command {
            Commands::Depth { levels, fail, .. } => {
                if let Some(levels) = levels {
                    demo.levels = *levels;
                }
                demo.fail |= *fail;
            }
            Commands::Nest {
                depth, child_len, ..
            } => {
                if let Some(depth) = depth {
                    demo.nesting = *depth;
                }
                if let Some(child_len) = child_len {
                    demo.child_len = *child_len;
                }
            }
            Commands::Trace { .. } | Commands::Halt { .. } | Commands::Config { .. } => {}
        }
        demo
    }
}

fn validate_format(format: &str) -> Result<(), ApiError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ApiError::InvalidArgument(format!(
            "Invalid format: {}. Must be 'text' or 'json'",
            other
        ))),
    }
}
