//! Generation orchestrator
//!
//! A run goes through three phases over a single [`GeneratorContext`]:
//!
//! 1. **resolve**: every discovered input type, plus every type reachable
//!    from it through parents and properties, gets an output node. Nodes are
//!    registered before their references are followed so cyclic graphs
//!    terminate.
//! 2. **assign**: each output node is rendered into the file the language
//!    picks for it, and cross-namespace references become file dependencies.
//! 3. **emit**: files are written under the output root.
//!
//! ## Usage
//!
//! ```no_run
//! use apigen_codegen::{Generator, TypeScriptLanguage};
//! use apigen_source::ManifestSource;
//!
//! let source = ManifestSource::from_path("schema/")?;
//! let language = TypeScriptLanguage::new();
//! let context = Generator::new(&source, &language).generate("assets/src", None)?;
//! println!("{} file(s) written", context.file_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use apigen_core::{CoreError, GeneratorContext, Property, Source, TypeNode};
use tracing::{debug, info, instrument, warn};

use crate::error::CodegenError;
use crate::language::Language;

pub struct Generator<'a> {
    source: &'a dyn Source,
    language: &'a dyn Language,
}

impl<'a> Generator<'a> {
    pub fn new(source: &'a dyn Source, language: &'a dyn Language) -> Self {
        Self { source, language }
    }

    /// Run all phases and write files under `directory`, which must exist.
    ///
    /// A fresh context is created unless one is given.
    #[instrument(skip(self, directory, context), fields(language = self.language.name()))]
    pub fn generate(
        &self,
        directory: impl AsRef<Path>,
        context: Option<GeneratorContext>,
    ) -> Result<GeneratorContext, CodegenError> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(CodegenError::DirectoryNotFound(directory.to_path_buf()));
        }

        let mut context = context.unwrap_or_default();
        self.language.prepare_context(&mut context);

        self.resolve_all(&mut context)?;
        self.assign_files(&mut context, directory)?;
        self.emit(&context)?;

        info!(
            "Generated {} type(s) in {} file(s)",
            context.type_count(),
            context.file_count()
        );
        Ok(context)
    }

    /// Resolve every discovered type and everything reachable from it
    pub fn resolve_all(&self, context: &mut GeneratorContext) -> Result<(), CodegenError> {
        let inputs = self.source.find_types(&context.configuration)?;
        debug!("Source returned {} type(s)", inputs.len());

        for input in &inputs {
            self.resolve_type(context, input)?;
        }
        Ok(())
    }

    /// Output identity for `input`, creating the output node on first sight.
    ///
    /// Returns `None` when the language declined the type.
    fn resolve_type(
        &self,
        context: &mut GeneratorContext,
        input: &TypeNode,
    ) -> Result<Option<String>, CodegenError> {
        let type_id = input.id();
        if context.has_type(&type_id) {
            return Ok(Some(type_id));
        }
        if context.is_skipped(&type_id) {
            return Ok(None);
        }

        let Some(shell) = self.language.shell_type(context, input) else {
            warn!("Skipping source type: '{}'", type_id);
            context.mark_skipped(type_id);
            return Ok(None);
        };

        let shell_id = shell.id();
        if shell_id != type_id {
            return Err(CoreError::IdentityMismatch {
                expected: type_id,
                actual: shell_id,
            }
            .into());
        }

        debug!("Resolving '{}'", type_id);
        context.add_type(shell)?;

        if let Some(parent) = &input.parent {
            let resolved = self.resolve_reference(context, parent)?;
            if resolved.is_none() {
                warn!("'{}' parent '{}' could not be resolved", type_id, parent);
            }
            if let Some(output) = context.get_type_mut(&type_id) {
                output.parent = resolved;
            }
        }

        let mut properties = Vec::with_capacity(input.properties.len());
        for property in input.properties.values() {
            properties.push(self.resolve_property(context, &type_id, property)?);
        }
        if let Some(output) = context.get_type_mut(&type_id) {
            for property in properties {
                output.add_property(property);
            }
        }

        Ok(Some(type_id))
    }

    /// Output identity for a native identifier, looking in the context first
    /// and then asking the source
    fn resolve_reference(
        &self,
        context: &mut GeneratorContext,
        identifier: &str,
    ) -> Result<Option<String>, CodegenError> {
        if context.has_type(identifier) {
            return Ok(Some(identifier.to_string()));
        }
        if context.is_skipped(identifier) {
            return Ok(None);
        }
        match self.source.resolve_type(&context.configuration, identifier)? {
            Some(input) => self.resolve_type(context, &input),
            None => Ok(None),
        }
    }

    fn resolve_property(
        &self,
        context: &mut GeneratorContext,
        owner: &str,
        property: &Property,
    ) -> Result<Property, CodegenError> {
        let mut resolved = Property::new(property.name.clone())
            .nullable(property.nullable)
            .collection(property.collection);

        for candidate in &property.types {
            match self.resolve_candidate(context, candidate)? {
                Some(type_id) => resolved.push_type(type_id),
                None => warn!(
                    "'{}.{}' type '{}' could not be resolved",
                    owner, property.name, candidate
                ),
            }
        }

        // aliases may collapse a union into a single type
        resolved.is_sum_type = resolved.types.len() > 1;
        Ok(resolved)
    }

    /// What a single property type identifier refers to in the output
    fn resolve_candidate(
        &self,
        context: &mut GeneratorContext,
        candidate: &str,
    ) -> Result<Option<String>, CodegenError> {
        if let Some(alias) = self.chase_alias(context, candidate)? {
            return Ok(Some(
                self.resolve_reference(context, &alias)?.unwrap_or(alias),
            ));
        }

        if let Some(type_id) = self.resolve_reference(context, candidate)? {
            return Ok(Some(type_id));
        }

        if self.language.primitive(candidate).is_some() {
            return Ok(Some(candidate.to_string()));
        }

        Ok(None)
    }

    /// Follow aliases until an identifier without alias is reached.
    ///
    /// Returns `None` when `identifier` has no alias at all.
    fn chase_alias(
        &self,
        context: &GeneratorContext,
        identifier: &str,
    ) -> Result<Option<String>, CodegenError> {
        let mut current = identifier.to_string();
        let mut visited = HashSet::from([current.clone()]);

        while let Some(next) = self.source.resolve_alias(&context.configuration, &current)? {
            if !visited.insert(next.clone()) {
                warn!(
                    "Alias cycle from '{}' through '{}', stopping at '{}'",
                    identifier, next, current
                );
                break;
            }
            debug!("'{}' is aliased to '{}'", current, next);
            current = next;
        }

        Ok((current != identifier).then_some(current))
    }

    /// Render every output type into its file and record file dependencies
    pub fn assign_files(
        &self,
        context: &mut GeneratorContext,
        directory: &Path,
    ) -> Result<(), CodegenError> {
        let type_ids: Vec<String> = context.type_ids().map(str::to_string).collect();

        for type_id in type_ids {
            let Some(output) = context.get_type(&type_id) else {
                continue;
            };

            let path = directory.join(self.language.target_file(context, output));
            let namespace = output.namespace.clone();

            let references = output
                .parent
                .iter()
                .chain(output.properties.values().flat_map(|p| p.types.iter()));
            let mut dependencies = Vec::new();
            for reference in references {
                if let Some(target) = context.get_type(reference) {
                    if target.namespace != namespace {
                        dependencies.push(reference.clone());
                    }
                }
            }

            let code = self.language.render_type(context, output)?;

            let file = context.get_file(&path, &namespace)?;
            for dependency in dependencies {
                file.add_dependency(dependency);
            }
            file.add_code_block(code);
        }

        Ok(())
    }

    /// Write every file, replacing what is already there
    pub fn emit(&self, context: &GeneratorContext) -> Result<(), CodegenError> {
        for file in context.files() {
            let path = file.path();

            if path.exists() {
                warn!("File overwrite: {}", path.display());
                fs::remove_file(path).map_err(CodegenError::io(path))?;
            } else {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.is_dir() {
                        warn!("Directory creation: {}", parent.display());
                        fs::create_dir_all(parent).map_err(CodegenError::io(parent))?;
                    }
                }
                info!("File creation: {}", path.display());
            }

            let mut content = self.language.render_header(context, file)?;
            content.push('\n');
            for block in file.code_blocks() {
                content.push('\n');
                content.push_str(block);
                content.push('\n');
            }

            fs::write(path, content).map_err(CodegenError::io(path))?;
        }

        Ok(())
    }
}
