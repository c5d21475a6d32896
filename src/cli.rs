//! CLI domain: parse, route, output, and presentation only.
//! Chains are assembled by `trace::scenario`; the route table only runs them.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_config_toml, format_report_json, format_report_text, CommandOutput, RunReport,
};
pub use route::RunContext;
