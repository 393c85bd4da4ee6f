//! Documentation extraction
//!
//! A `DocExtractor` turns component (or example) source into a description
//! and a prop table. The generator only depends on the trait; `ReactDocgen`
//! is the implementation used by the CLI.

mod react;
pub mod scan;

pub use react::ReactDocgen;

use thiserror::Error;

use crate::models::Props;

/// Documentation pulled out of one source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocInfo {
    pub description: Option<String>,
    pub props: Props,
}

/// Reasons a source file could not be documented
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No suitable component definition found.")]
    NoComponentDefinition,

    #[error("Multiple exported component definitions found.")]
    MultipleDefinitions,

    #[error("Unbalanced brackets in {object}.")]
    Unbalanced { object: String },

    #[error("{0}")]
    Other(String),
}

/// Extracts documentation from source text
pub trait DocExtractor {
    fn extract(&self, source: &str) -> Result<DocInfo, ExtractError>;
}

impl<F> DocExtractor for F
where
    F: Fn(&str) -> Result<DocInfo, ExtractError>,
{
    fn extract(&self, source: &str) -> Result<DocInfo, ExtractError> {
        self(source)
    }
}
