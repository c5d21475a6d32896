//! CLI parse: clap types for stagechain. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stagechain CLI - run demo behavior chains and show their dispatch order
#[derive(Parser)]
#[command(name = "stagechain")]
#[command(about = "Run demo behavior chains and show their dispatch order")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory searched for stagechain.toml
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Disable colored trace output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run [A, B -> [C], D] and print the observed trace
    Trace {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run a flat chain of numbered behaviors
    Depth {
        /// Number of behaviors (defaults to demo.levels)
        #[arg(long)]
        levels: Option<usize>,
        /// Append a behavior that fails
        #[arg(long)]
        fail: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run nested stage transitions
    Nest {
        /// Number of nested transitions (defaults to demo.nesting)
        #[arg(long)]
        depth: Option<usize>,
        /// Behaviors in the innermost sub-chain (defaults to demo.child_len)
        #[arg(long)]
        child_len: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run a chain whose second behavior never calls next
    Halt {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration (text renders as TOML)
    Config {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

impl Commands {
    pub fn format(&self) -> &str {
        match self {
            Commands::Trace { format }
            | Commands::Depth { format, .. }
            | Commands::Nest { format, .. }
            | Commands::Halt { format }
            | Commands::Config { format } => format,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Commands::Trace { .. } => "trace",
            Commands::Depth { .. } => "depth",
            Commands::Nest { .. } => "nest",
            Commands::Halt { .. } => "halt",
            Commands::Config { .. } => "config",
        }
    }
}
