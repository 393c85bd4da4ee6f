//! Configuration module for compdoc
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (COMPDOC_*)
//! 3. Project config (`compdoc.toml` at the project root, or `--config`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{load_or_default, with_env_overrides, ConfigWarning, CONFIG_FILE};
pub use types::{
    ColorMode, Config, OutputConfig, PathConfig, PathsConfig, SourceConfig, WatchConfig,
};
