//! Generated file accumulator

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::namespace::TypeNamespace;

/// One file to be written: its code blocks plus the types it depends on
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
    namespace: TypeNamespace,
    /// Identities of the types this file imports
    dependencies: IndexSet<String>,
    code_blocks: Vec<String>,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>, namespace: TypeNamespace) -> Self {
        Self {
            path: path.into(),
            namespace,
            dependencies: IndexSet::new(),
            code_blocks: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn namespace(&self) -> &TypeNamespace {
        &self.namespace
    }

    /// Record a dependency, returns `false` if it was already known
    pub fn add_dependency(&mut self, type_id: impl Into<String>) -> bool {
        self.dependencies.insert(type_id.into())
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(String::as_str)
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    pub fn add_code_block(&mut self, code: impl Into<String>) {
        self.code_blocks.push(code.into());
    }

    pub fn code_blocks(&self) -> &[String] {
        &self.code_blocks
    }
}
