//! Per-run resolution context
//!
//! Owns every output type and output file of one generation run. Types are
//! keyed by identity and files by path; both tables keep insertion order so
//! generated output is reproducible.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::config::Configuration;
use crate::error::CoreError;
use crate::namespace::TypeNamespace;
use crate::output::OutputFile;
use crate::types::TypeNode;

#[derive(Debug, Default)]
pub struct GeneratorContext {
    pub configuration: Configuration,
    types: IndexMap<String, TypeNode>,
    files: IndexMap<PathBuf, OutputFile>,
    skipped: HashSet<String>,
}

impl GeneratorContext {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            types: IndexMap::new(),
            files: IndexMap::new(),
            skipped: HashSet::new(),
        }
    }

    /// Map a source namespace to its output namespace
    pub fn resolve_namespace(
        &self,
        input: &TypeNamespace,
        separator: Option<char>,
    ) -> TypeNamespace {
        let mut namespace = input.clone();

        if let Some(prefix) = &self.configuration.namespace_input_prefix {
            namespace = namespace.shift(prefix);
        }
        if let Some(prefix) = &self.configuration.namespace_output_prefix {
            namespace = namespace.unshift(prefix);
        }
        if let Some(separator) = separator {
            namespace = namespace.convert(separator);
        }

        namespace
    }

    /// Register an output type under its identity
    pub fn add_type(&mut self, output: TypeNode) -> Result<(), CoreError> {
        let type_id = output.id();
        if self.types.contains_key(&type_id) {
            return Err(CoreError::DuplicateType(type_id));
        }
        self.types.insert(type_id, output);
        Ok(())
    }

    pub fn get_type(&self, type_id: &str) -> Option<&TypeNode> {
        self.types.get(type_id)
    }

    pub fn get_type_mut(&mut self, type_id: &str) -> Option<&mut TypeNode> {
        self.types.get_mut(type_id)
    }

    pub fn has_type(&self, type_id: &str) -> bool {
        self.types.contains_key(type_id)
    }

    /// All output types in registration order
    pub fn types(&self) -> impl Iterator<Item = &TypeNode> {
        self.types.values()
    }

    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Remember that no output type exists for this identity
    pub fn mark_skipped(&mut self, type_id: impl Into<String>) {
        self.skipped.insert(type_id.into());
    }

    pub fn is_skipped(&self, type_id: &str) -> bool {
        self.skipped.contains(type_id)
    }

    /// Fetch the file registered at `path`, creating it on first use.
    ///
    /// A path can only ever hold one namespace.
    pub fn get_file(
        &mut self,
        path: &Path,
        namespace: &TypeNamespace,
    ) -> Result<&mut OutputFile, CoreError> {
        if let Some(found) = self.files.get(path) {
            if found.namespace() != namespace {
                return Err(CoreError::NamespaceMismatch {
                    path: path.to_path_buf(),
                    existing: found.namespace().to_string(),
                    requested: namespace.to_string(),
                });
            }
        }

        Ok(self.files.entry(path.to_path_buf()).or_insert_with(|| {
            debug!("New output file {} for namespace '{}'", path.display(), namespace);
            OutputFile::new(path, namespace.clone())
        }))
    }

    /// All output files in creation order
    pub fn files(&self) -> impl Iterator<Item = &OutputFile> {
        self.files.values()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
