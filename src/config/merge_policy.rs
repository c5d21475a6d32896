//! Merge rules: defaults and override order.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("demo.levels", 20_i64)?
        .set_default("demo.fail", false)?
        .set_default("demo.nesting", 3_i64)?
        .set_default("demo.child_len", 1_i64)
}

/// Environment overrides, e.g. `STAGECHAIN__DEMO__LEVELS=40`.
///
/// Added last so it wins over every file source.
pub fn environment() -> Environment {
    Environment::with_prefix("STAGECHAIN")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
