//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CompdocResult;

use super::loader::{self, ConfigWarning};

/// Root configuration (`compdoc.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Input and output locations, relative to the project root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_components")]
    pub components: PathBuf,

    #[serde(default = "default_examples")]
    pub examples: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            components: default_components(),
            examples: default_examples(),
            output: default_output(),
        }
    }
}

fn default_components() -> PathBuf {
    PathBuf::from("src/components")
}

fn default_examples() -> PathBuf {
    PathBuf::from("src/docs/examples")
}

fn default_output() -> PathBuf {
    PathBuf::from("config/componentData.js")
}

/// Source file conventions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Extension of component main files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

fn default_extension() -> String {
    "js".to_string()
}

/// Watch mode settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    crate::watcher::DEBOUNCE_MS
}

/// Console output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// The three locations a generation pass works with.
///
/// Fixed for the lifetime of the process and handed to the generator
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    pub examples: PathBuf,
    pub components: PathBuf,
    pub output: PathBuf,
}

impl PathConfig {
    pub fn new(
        examples: impl Into<PathBuf>,
        components: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            examples: examples.into(),
            components: components.into(),
            output: output.into(),
        }
    }

    /// Roots observed in watch mode
    pub fn watch_roots(&self) -> [&Path; 2] {
        [&self.examples, &self.components]
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> CompdocResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> CompdocResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve configured paths against the project root
    pub fn resolve_paths(&self, root: &Path) -> PathConfig {
        PathConfig {
            examples: resolve(root, &self.paths.examples),
            components: resolve(root, &self.paths.components),
            output: resolve(root, &self.paths.output),
        }
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
