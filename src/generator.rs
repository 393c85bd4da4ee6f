//! Generation pass
//!
//! One pass lists the component directories, collects every component,
//! picks the output document and writes `module.exports = <json>`.
//!
//! A pass never aborts on a component failure. If any component failed, the
//! written document is the list of error messages and the successfully
//! collected records of that pass are dropped.

use std::sync::Mutex;

use serde::Serialize;

use crate::collector::collect_component;
use crate::config::PathConfig;
use crate::docgen::{DocExtractor, ReactDocgen};
use crate::error::{CompdocError, CompdocResult};
use crate::fs::{content_hash, FileSystem, LocalFs};
use crate::models::{GenerationReport, GenerationWarning, OutputDocument};

/// Prefix of the generated data module
pub const MODULE_PREFIX: &str = "module.exports = ";

/// Where a pass currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassState {
    #[default]
    Idle,
    Collecting,
    Serializing,
}

/// Events emitted during a pass (also the NDJSON stream for `--json`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GenerateEvent {
    GenerationStarted {
        components_root: String,
        components: usize,
    },
    ComponentCollected {
        name: String,
        props: usize,
        examples: usize,
    },
    ComponentFailed {
        name: String,
        message: String,
    },
    MissingExamples {
        component: String,
    },
    GenerationComplete {
        output: String,
        components: usize,
        changed: bool,
    },
    GenerationFailed {
        output: String,
        errors: Vec<String>,
        changed: bool,
    },
}

impl GenerateEvent {
    /// Convert to JSON string with "command": "generate" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("generate"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Component metadata generator
///
/// Holds the fixed path configuration and the collaborators; every call to
/// [`Generator::generate`] is an independent pass.
pub struct Generator<F = LocalFs, E = ReactDocgen> {
    fs: F,
    extractor: E,
    paths: PathConfig,
    extension: String,
    state: Mutex<PassState>,
}

impl Generator<LocalFs, ReactDocgen> {
    /// Generator over the local disk using the React extractor
    pub fn local(paths: PathConfig) -> Self {
        Self::new(LocalFs::new(), ReactDocgen::new(), paths)
    }
}

impl<F: FileSystem, E: DocExtractor> Generator<F, E> {
    pub fn new(fs: F, extractor: E, paths: PathConfig) -> Self {
        Self {
            fs,
            extractor,
            paths,
            extension: "js".to_string(),
            state: Mutex::new(PassState::Idle),
        }
    }

    /// Set the extension of component main files
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn paths(&self) -> &PathConfig {
        &self.paths
    }

    pub fn state(&self) -> PassState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run one full pass.
    ///
    /// Returns an error only when the pass itself could not run: the
    /// components root is unreadable, the document could not be serialized
    /// or the output could not be written. Component failures end up in the
    /// report's document.
    pub fn generate(&self, on_event: impl Fn(GenerateEvent)) -> CompdocResult<GenerationReport> {
        let mut guard = PassGuard::acquire(&self.state)?;

        let mut names = self.fs.list_directories(&self.paths.components)?;
        names.sort();

        on_event(GenerateEvent::GenerationStarted {
            components_root: self.paths.components.display().to_string(),
            components: names.len(),
        });

        let mut records = Vec::with_capacity(names.len());
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for name in &names {
            let seen = warnings.len();
            let result = collect_component(
                &self.fs,
                &self.extractor,
                &self.paths,
                name,
                &self.extension,
                &mut warnings,
            );
            for warning in &warnings[seen..] {
                let GenerationWarning::MissingExamples { component } = warning;
                on_event(GenerateEvent::MissingExamples {
                    component: component.clone(),
                });
            }

            match result {
                Ok(record) => {
                    on_event(GenerateEvent::ComponentCollected {
                        name: name.clone(),
                        props: record.props.len(),
                        examples: record.examples.len(),
                    });
                    records.push(record);
                }
                Err(err) => {
                    on_event(GenerateEvent::ComponentFailed {
                        name: name.clone(),
                        message: err.to_string(),
                    });
                    errors.push(failure_message(name, &err));
                }
            }
        }

        guard.set(PassState::Serializing);
        let document = if errors.is_empty() {
            OutputDocument::Success(records)
        } else {
            OutputDocument::Failure(errors)
        };

        let content = render_module(&document)?;
        let changed = self.write_if_changed(&content)?;

        let output = self.paths.output.display().to_string();
        match &document {
            OutputDocument::Success(records) => on_event(GenerateEvent::GenerationComplete {
                output,
                components: records.len(),
                changed,
            }),
            OutputDocument::Failure(errors) => on_event(GenerateEvent::GenerationFailed {
                output,
                errors: errors.clone(),
                changed,
            }),
        }

        Ok(GenerationReport {
            document,
            warnings,
            output: self.paths.output.clone(),
            changed,
        })
    }

    /// Write the module unless the file already holds the same content.
    fn write_if_changed(&self, content: &str) -> CompdocResult<bool> {
        if let Ok(existing) = self.fs.read_text(&self.paths.output) {
            if content_hash(&existing) == content_hash(content) {
                return Ok(false);
            }
        }
        self.fs.write_text(&self.paths.output, content)?;
        Ok(true)
    }
}

/// Message recorded for a component that could not be collected
///
/// `An error occurred while attempting to generate metadata for <name>: Error: <message>`
pub fn failure_message(component: &str, err: &CompdocError) -> String {
    format!(
        "An error occurred while attempting to generate metadata for {}: Error: {}",
        component, err
    )
}

/// Serialize a document as `module.exports = <json>`
pub fn render_module(document: &OutputDocument) -> CompdocResult<String> {
    Ok(format!("{}{}", MODULE_PREFIX, serde_json::to_string(document)?))
}

/// Marks the generator busy for the duration of a pass
struct PassGuard<'a> {
    state: &'a Mutex<PassState>,
}

impl<'a> PassGuard<'a> {
    fn acquire(state: &'a Mutex<PassState>) -> CompdocResult<Self> {
        let mut current = state.lock().unwrap_or_else(|e| e.into_inner());
        if *current != PassState::Idle {
            return Err(CompdocError::PassInProgress);
        }
        *current = PassState::Collecting;
        Ok(Self { state })
    }

    fn set(&mut self, next: PassState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.set(PassState::Idle);
    }
}
