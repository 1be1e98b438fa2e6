//! [`Source`] implementation backed by manifest documents
//!
//! ## Usage
//!
//! ```no_run
//! use apigen_core::{Configuration, Source};
//! use apigen_source::ManifestSource;
//!
//! let source = ManifestSource::from_path("schema/")?;
//! let types = source.find_types(&Configuration::new())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use apigen_core::namespace::OUTPUT_SEPARATOR;
use apigen_core::{Configuration, CoreError, Property, Source, TypeNamespace, TypeNode};
use tracing::{debug, error, info, instrument, warn};
use walkdir::WalkDir;

use crate::alias::TypeAliasRegistry;
use crate::catalog::{normalize_identifier, TypeCatalog};
use crate::error::SourceError;
use crate::expression::property_from_expression;
use crate::manifest::{GeneratedProperty, Manifest, PropertyDeclaration, TypeDeclaration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ManifestSource {
    catalog: TypeCatalog,
    /// Restricts discovery to these native names when set
    type_list: Option<Vec<String>>,
    aliases: TypeAliasRegistry,
}

impl ManifestSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: Manifest) -> Self {
        let mut source = Self::new();
        source.add_manifest(manifest);
        source
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SourceError> {
        Ok(Self::from_manifest(serde_yaml::from_str(content)?))
    }

    pub fn from_json_str(content: &str) -> Result<Self, SourceError> {
        Ok(Self::from_manifest(serde_json::from_str(content)?))
    }

    /// Load a manifest file, or every manifest found under a directory
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let mut source = Self::new();
        source.load_path(path)?;
        Ok(source)
    }

    /// Load every `.yaml`, `.yml` and `.json` manifest under `directory`
    pub fn from_directory(directory: impl AsRef<Path>) -> Result<Self, SourceError> {
        let mut source = Self::new();
        source.load_directory(directory)?;
        Ok(source)
    }

    pub fn with_type_list<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.type_list = Some(
            types
                .into_iter()
                .map(|t| normalize_identifier(t.as_ref()).to_string())
                .collect(),
        );
        self
    }

    pub fn with_aliases(mut self, aliases: TypeAliasRegistry) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Merge a manifest, earlier declarations win
    pub fn add_manifest(&mut self, manifest: Manifest) {
        for declaration in manifest.into_declarations() {
            let name = declaration.name.clone();
            if !self.catalog.insert(declaration) {
                warn!("'{}' is declared more than once, keeping the first", name);
            }
        }
    }

    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<(), SourceError> {
        let path = path.as_ref();
        if path.is_dir() {
            self.load_directory(path)
        } else {
            self.load_file(path)
        }
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), SourceError> {
        let path = path.as_ref();
        let format =
            Format::of(path).ok_or_else(|| SourceError::UnsupportedFormat(path.to_path_buf()))?;

        debug!("Loading manifest {}", path.display());
        let content = fs::read_to_string(path)?;
        let manifest = match format {
            Format::Yaml => serde_yaml::from_str(&content)?,
            Format::Json => serde_json::from_str(&content)?,
        };
        self.add_manifest(manifest);
        Ok(())
    }

    pub fn load_directory(&mut self, directory: impl AsRef<Path>) -> Result<(), SourceError> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(SourceError::NotADirectory(directory.to_path_buf()));
        }

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(directory).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && Format::of(entry.path()).is_some() {
                files.push(entry.into_path());
            }
        }

        for file in files {
            self.load_file(&file)?;
        }
        Ok(())
    }

    fn type_list(&self) -> Vec<String> {
        match &self.type_list {
            Some(list) => list.clone(),
            None => self.catalog.names().map(str::to_string).collect(),
        }
    }

    /// Build the input node of a declared type
    #[instrument(skip(self, configuration), level = "debug")]
    fn create_type(
        &self,
        configuration: &Configuration,
        native: &str,
    ) -> Result<Option<TypeNode>, SourceError> {
        let native = normalize_identifier(native);
        let Some(declaration) = self.catalog.get(native) else {
            return Ok(None);
        };

        if configuration.ignore_internal && declaration.internal {
            info!("'{}' is ignored (internal)", native);
            return Ok(None);
        }

        let mut found_using_attributes = false;
        let mut output_name = None;
        let mut output_namespace = None;
        let mut usage = None;

        for attr in declaration.generated.as_slice() {
            if !configuration.accepts_groups(&attr.groups) {
                info!("'{}' is ignored using attribute (unmatched groups)", native);
                continue;
            }
            if attr.ignore {
                info!("'{}' is ignored using attribute (ignored)", native);
                return Ok(None);
            }
            if found_using_attributes {
                warn!("'{}' more than one attribute compete for types", native);
                return Err(SourceError::CompetingAttributes {
                    target: native.to_string(),
                    kind: "type",
                });
            }
            found_using_attributes = true;
            output_name = attr.name.clone();
            output_namespace = attr.namespace.clone();
            usage = attr.usage.clone();
        }

        let (declared_namespace, short_name) = declaration.split_name();
        let namespace = match output_namespace {
            Some(namespace) => {
                TypeNamespace::new(&namespace, OUTPUT_SEPARATOR).convert(declaration.separator)
            }
            None => TypeNamespace::new(declared_namespace, declaration.separator),
        };

        let mut node = TypeNode::new(output_name.unwrap_or_else(|| short_name.to_string()), namespace)
            .with_native_name(native)
            .with_usage(usage.unwrap_or_default())
            .with_abstract(declaration.is_abstract);

        if let Some(parent) = &declaration.parent {
            node = node.with_parent(normalize_identifier(parent));
        }

        for property in self.find_properties(configuration, declaration, native)? {
            let name = property.name.clone();
            if !node.add_property(property) {
                info!("'{}.{}' was previously found", native, name);
            }
        }

        Ok(Some(node))
    }

    fn find_properties(
        &self,
        configuration: &Configuration,
        declaration: &TypeDeclaration,
        native: &str,
    ) -> Result<Vec<Property>, SourceError> {
        let mut properties = Vec::new();

        for attr in &declaration.virtual_properties {
            let Some(name) = attr.name.as_deref() else {
                error!("'{}' has a virtual property with no name", native);
                continue;
            };
            if !configuration.accepts_groups(&attr.groups) {
                info!("'{}.{}' is ignored using attribute (unmatched groups)", native, name);
                continue;
            }
            if attr.ignore {
                continue;
            }
            if attr.type_list().is_empty() {
                warn!("'{}.{}' virtual property has no type", native, name);
            }
            properties.push(Self::property_from_attribute(name, attr));
        }

        for declared in &declaration.properties {
            if configuration.ignore_internal && declared.internal {
                info!("'{}.{}' is ignored (internal)", native, declared.name);
                continue;
            }
            if let Some(property) = self.resolve_property(configuration, declared, native)? {
                properties.push(property);
            }
        }

        Ok(properties)
    }

    fn resolve_property(
        &self,
        configuration: &Configuration,
        declared: &PropertyDeclaration,
        native: &str,
    ) -> Result<Option<Property>, SourceError> {
        let mut name = declared.name.as_str();
        let mut overridden: Option<Property> = None;

        for attr in declared.generated.as_slice() {
            if !configuration.accepts_groups(&attr.groups) {
                info!("'{}.{}' is ignored using attribute (unmatched groups)", native, name);
                continue;
            }
            if attr.ignore {
                info!("'{}.{}' is ignored using attribute (ignored)", native, name);
                return Ok(None);
            }
            if let Some(renamed) = attr.name.as_deref() {
                name = renamed;
            }
            if overridden.is_some() {
                warn!("'{}.{}' more than one attribute compete for types", native, name);
                return Err(SourceError::CompetingAttributes {
                    target: format!("{}.{}", native, name),
                    kind: "property",
                });
            }
            if !attr.type_list().is_empty() {
                overridden = Some(Self::property_from_attribute(name, attr));
            }
        }

        Ok(Some(match overridden {
            Some(property) => property,
            None => property_from_expression(
                name,
                declared.type_expression.as_deref(),
                &self.catalog,
            ),
        }))
    }

    fn property_from_attribute(name: &str, attr: &GeneratedProperty) -> Property {
        Property::new(name)
            .with_types(attr.type_list().iter().map(|t| normalize_identifier(t)))
            .collection(attr.collection)
            .nullable(attr.nullable)
    }
}

impl Source for ManifestSource {
    fn find_types(&self, configuration: &Configuration) -> Result<Vec<TypeNode>, CoreError> {
        let mut found = Vec::new();

        for native in self.type_list() {
            if let Some(alias) = self.aliases.get_type_alias(configuration, &self.catalog, &native)? {
                debug!("'{}' is an alias of '{}', not generated", native, alias);
                continue;
            }
            if let Some(node) = self.create_type(configuration, &native)? {
                found.push(node);
            }
        }

        Ok(found)
    }

    fn resolve_type(
        &self,
        configuration: &Configuration,
        identifier: &str,
    ) -> Result<Option<TypeNode>, CoreError> {
        Ok(self.create_type(configuration, identifier)?)
    }

    fn resolve_alias(
        &self,
        configuration: &Configuration,
        identifier: &str,
    ) -> Result<Option<String>, CoreError> {
        Ok(self
            .aliases
            .get_type_alias(configuration, &self.catalog, identifier)?)
    }
}
