//! Per-component collection
//!
//! Reads a component's main file and its examples and turns them into
//! records. Failures propagate to the generator, which decides what a failed
//! component means for the pass.

use std::path::Path;

use crate::config::PathConfig;
use crate::docgen::DocExtractor;
use crate::error::{CompdocError, CompdocResult};
use crate::fs::FileSystem;
use crate::models::{ComponentRecord, ExampleRecord, GenerationWarning};

/// Collect the examples documented under `examples_root/<component_name>`.
///
/// A missing or unreadable examples directory is not an error: a warning is
/// recorded and no examples are returned. A file that cannot be read or
/// documented fails the whole component.
pub fn collect_examples<F, E>(
    fs: &F,
    extractor: &E,
    examples_root: &Path,
    component_name: &str,
    warnings: &mut Vec<GenerationWarning>,
) -> CompdocResult<Vec<ExampleRecord>>
where
    F: FileSystem + ?Sized,
    E: DocExtractor + ?Sized,
{
    let dir = examples_root.join(component_name);
    let files = match fs.list_files(&dir) {
        Ok(files) => files,
        Err(_) => {
            warnings.push(GenerationWarning::MissingExamples {
                component: component_name.to_string(),
            });
            return Ok(Vec::new());
        }
    };

    let mut examples = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file);
        let content = fs.read_text(&path)?;
        let info = extractor
            .extract(&content)
            .map_err(|source| CompdocError::Extraction {
                file: path.clone(),
                source,
            })?;
        examples.push(ExampleRecord {
            name: example_name(&file),
            description: info.description,
            code: content,
        });
    }
    Ok(examples)
}

/// Collect the record for one component directory.
///
/// The main file must be `<components>/<name>/<name>.<extension>`; a directory
/// without it fails with `NamingConvention`.
pub fn collect_component<F, E>(
    fs: &F,
    extractor: &E,
    paths: &PathConfig,
    component_name: &str,
    extension: &str,
    warnings: &mut Vec<GenerationWarning>,
) -> CompdocResult<ComponentRecord>
where
    F: FileSystem + ?Sized,
    E: DocExtractor + ?Sized,
{
    let main_file = main_file_path(paths, component_name, extension);
    if !fs.is_file(&main_file) {
        return Err(CompdocError::NamingConvention {
            component: component_name.to_string(),
            expected: main_file,
        });
    }

    let content = fs.read_text(&main_file)?;
    let info = extractor
        .extract(&content)
        .map_err(|source| CompdocError::Extraction {
            file: main_file.clone(),
            source,
        })?;

    // Examples are collected only after the component itself parsed
    let examples = collect_examples(fs, extractor, &paths.examples, component_name, warnings)?;

    Ok(ComponentRecord {
        name: component_name.to_string(),
        description: info.description,
        props: info.props,
        code: content,
        examples,
    })
}

/// `<components>/<name>/<name>.<extension>`
pub fn main_file_path(paths: &PathConfig, component_name: &str, extension: &str) -> std::path::PathBuf {
    paths
        .components
        .join(component_name)
        .join(format!("{}.{}", component_name, extension))
}

/// Example name: the file name without its last three characters.
///
/// By convention example files are `<Name>.js`, so this drops the extension.
/// Names shorter than three characters yield an empty name.
pub fn example_name(file_name: &str) -> String {
    let mut chars = file_name.chars();
    for _ in 0..3 {
        chars.next_back();
    }
    chars.as_str().to_string()
}
