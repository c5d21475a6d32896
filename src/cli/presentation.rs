//! CLI presentation: run report and configuration formatters (text and json).

use crate::config::StagechainConfig;
use crate::error::ApiError;
use crate::runner::Outcome;
use crate::trace::{Phase, TraceEvent};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Result of running one demo chain.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub scenario: String,
    /// RFC 3339 time at which the invocation started.
    pub started_at: String,
    pub outcome: Option<Outcome>,
    pub error: Option<String>,
    pub events: Vec<TraceEvent>,
}

impl RunReport {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// What a command produced.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    Report(RunReport),
    Config(StagechainConfig),
}

impl CommandOutput {
    pub fn report(&self) -> Option<&RunReport> {
        match self {
            CommandOutput::Report(report) => Some(report),
            CommandOutput::Config(_) => None,
        }
    }

    /// True when a chain ran and raised an error.
    pub fn failed(&self) -> bool {
        self.report().map(RunReport::failed).unwrap_or(false)
    }

    pub fn render(&self, format: &str, color: bool) -> Result<String, ApiError> {
        match (self, format) {
            (CommandOutput::Report(report), "json") => format_report_json(report),
            (CommandOutput::Report(report), _) => Ok(format_report_text(report, color)),
            (CommandOutput::Config(config), "json") => Ok(serde_json::to_string_pretty(config)?),
            (CommandOutput::Config(config), _) => format_config_toml(config),
        }
    }
}

/// Renders the trace as an indented onion: each behavior's before/after pair
/// encloses everything it wrapped.
pub fn format_report_text(report: &RunReport, color: bool) -> String {
    let mut lines = vec![format!(
        "Scenario: {} (started {})",
        report.scenario, report.started_at
    )];
    let mut open: Vec<&str> = Vec::new();

    for event in &report.events {
        let indent = match event.phase {
            Phase::Before => {
                let indent = open.len();
                open.push(&event.label);
                indent
            }
            Phase::After => {
                let position = open
                    .iter()
                    .rposition(|label| *label == event.label)
                    .unwrap_or(open.len());
                open.truncate(position);
                position
            }
        };

        let text = event.to_string();
        let text = match (color, event.phase) {
            (false, _) => text,
            (true, Phase::Before) => text.green().to_string(),
            (true, Phase::After) => text.cyan().to_string(),
        };
        lines.push(format!(
            "  {}{}  [{}, depth {}]",
            "  ".repeat(indent),
            text,
            event.stage,
            event.depth
        ));
    }

    match (&report.outcome, &report.error) {
        (_, Some(error)) => {
            let line = format!("Failed: {}", error);
            lines.push(if color { line.red().to_string() } else { line });
        }
        (Some(Outcome::Completed), None) => lines.push("Outcome: completed".to_string()),
        (Some(Outcome::Halted), None) => lines.push("Outcome: halted".to_string()),
        (None, None) => {}
    }

    lines.join("\n")
}

pub fn format_report_json(report: &RunReport) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn format_config_toml(config: &StagechainConfig) -> Result<String, ApiError> {
    toml::to_string_pretty(config)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render configuration: {}", e)))
}
