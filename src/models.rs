//! Core data structures for generated component metadata

use std::path::PathBuf;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Metadata for a single component, as written to the data module
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRecord {
    /// Component name (its directory name)
    pub name: String,
    /// Doc block preceding the component definition
    pub description: Option<String>,
    /// Documented props in source order
    pub props: Props,
    /// Raw source of the main file
    pub code: String,
    /// Usage examples in listing order
    pub examples: Vec<ExampleRecord>,
}

/// A usage example attached to a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleRecord {
    /// File name without its extension
    pub name: String,
    pub description: Option<String>,
    pub code: String,
}

/// Ordered prop-name to metadata mapping.
///
/// Serializes as a JSON object whose keys keep declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(Vec<(String, PropInfo)>);

impl Props {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace a prop, keeping the first position on replace
    pub fn insert(&mut self, name: impl Into<String>, info: PropInfo) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = info,
            None => self.0.push((name, info)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropInfo> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PropInfo> {
        self.0.iter_mut().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropInfo)> {
        self.0.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Props {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, info) in &self.0 {
            map.serialize_entry(name, info)?;
        }
        map.end()
    }
}

/// Metadata for one prop
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub prop_type: Option<PropType>,
    pub required: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
}

/// Declared type of a prop (`PropTypes.*`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl PropType {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            raw: None,
        }
    }
}

/// Default value of a prop (`defaultProps`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultValue {
    /// Raw source text of the default expression
    pub value: String,
    /// True for identifiers and member expressions
    pub computed: bool,
}

/// Result document of one generation pass.
///
/// On disk both variants are a plain JSON array, so the data module keeps the
/// shape existing consumers read.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputDocument {
    Success(Vec<ComponentRecord>),
    Failure(Vec<String>),
}

impl OutputDocument {
    pub fn is_success(&self) -> bool {
        matches!(self, OutputDocument::Success(_))
    }

    pub fn len(&self) -> usize {
        match self {
            OutputDocument::Success(records) => records.len(),
            OutputDocument::Failure(errors) => errors.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> &[ComponentRecord] {
        match self {
            OutputDocument::Success(records) => records,
            OutputDocument::Failure(_) => &[],
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            OutputDocument::Success(_) => &[],
            OutputDocument::Failure(errors) => errors,
        }
    }
}

impl Serialize for OutputDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        match self {
            OutputDocument::Success(records) => {
                for record in records {
                    seq.serialize_element(record)?;
                }
            }
            OutputDocument::Failure(errors) => {
                for error in errors {
                    seq.serialize_element(error)?;
                }
            }
        }
        seq.end()
    }
}

/// Non-fatal condition raised while collecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    /// `examples/<component>` is missing or unreadable
    MissingExamples { component: String },
}

impl std::fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationWarning::MissingExamples { component } => {
                write!(f, "No examples found for {}.", component)
            }
        }
    }
}

/// Outcome of one generation pass
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub document: OutputDocument,
    pub warnings: Vec<GenerationWarning>,
    pub output: PathBuf,
    /// False when the output already held identical content
    pub changed: bool,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.document.is_success()
    }
}
