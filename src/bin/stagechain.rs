//! Stagechain CLI Binary
//!
//! Runs the demo behavior chains and prints the order in which behaviors ran.

use clap::Parser;
use stagechain::cli::{map_error, Cli, RunContext};
use stagechain::config::ConfigLoader;
use stagechain::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Stagechain CLI starting");

    let context = match RunContext::new(cli.dir.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let output = match context.execute(&cli.command) {
        Ok(output) => output,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match output.render(cli.command.format(), !cli.no_color) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            error!("Rendering failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }

    if output.failed() {
        info!("Chain raised an error");
        process::exit(1);
    }
    info!("Command completed successfully");
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.dir)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if cli.no_color {
        config.color = false;
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }

    config
}
