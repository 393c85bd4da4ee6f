//! compdoc - component metadata generator
//!
//! Scans a components directory, extracts each component's description and
//! props with a docgen extractor, pairs them with documented examples and
//! writes everything to a single `module.exports = <json>` file. A watch mode
//! regenerates the file whenever a component or example changes.

pub mod collector;
pub mod config;
pub mod docgen;
pub mod error;
pub mod fs;
pub mod generator;
pub mod models;
pub mod watcher;

// Re-exports for convenience
pub use config::{Config, PathConfig};
pub use docgen::{DocExtractor, DocInfo, ExtractError, ReactDocgen};
pub use error::{CompdocError, CompdocResult};
pub use fs::{FileSystem, LocalFs};
pub use generator::{GenerateEvent, Generator, PassState};
pub use models::{
    ComponentRecord, DefaultValue, ExampleRecord, GenerationReport, GenerationWarning,
    OutputDocument, PropInfo, PropType, Props,
};
pub use watcher::{WatchEvent, WatchOptions, WatchUseCase};
