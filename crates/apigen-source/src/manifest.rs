//! Declarative manifest model
//!
//! A manifest lists native types together with the metadata that drives
//! generation: renames, namespace overrides, aliases, groups and ignores.
//!
//! ```yaml
//! separator: "\\"
//! types:
//!   - name: App\Entity\User
//!     parent: App\Entity\Base
//!     generated:
//!       namespace: api/user
//!       groups: [public]
//!     properties:
//!       - name: id
//!         type: int
//!       - name: email
//!         type: "?string"
//! ```

use apigen_core::config::INPUT_SEPARATOR;
use apigen_core::Usage;
use serde::{Deserialize, Serialize};

fn default_separator() -> char {
    INPUT_SEPARATOR
}

fn default_true() -> bool {
    true
}

/// A value written either as a single item or as a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => std::slice::from_ref(item),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// One manifest document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Separator used in native names of this document
    #[serde(default = "default_separator")]
    pub separator: char,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

impl Manifest {
    /// Consume the document, stamping its separator on every declaration
    pub fn into_declarations(self) -> impl Iterator<Item = TypeDeclaration> {
        let separator = self.separator;
        self.types.into_iter().map(move |mut declaration| {
            declaration.separator = separator;
            declaration
        })
    }
}

/// A native type as reflection would describe it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDeclaration {
    /// Fully qualified native name
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub internal: bool,
    /// Interfaces implemented by this type
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub generated: OneOrMany<GeneratedType>,
    #[serde(default)]
    pub alias: OneOrMany<GeneratedTypeAlias>,
    /// Properties that exist only in the generated output
    #[serde(default)]
    pub virtual_properties: Vec<GeneratedProperty>,
    #[serde(default)]
    pub properties: Vec<PropertyDeclaration>,
    #[serde(skip, default = "default_separator")]
    pub separator: char,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            is_abstract: false,
            internal: false,
            implements: Vec::new(),
            generated: OneOrMany::default(),
            alias: OneOrMany::default(),
            virtual_properties: Vec::new(),
            properties: Vec::new(),
            separator: INPUT_SEPARATOR,
        }
    }

    /// Split the native name into its namespace and short name
    pub fn split_name(&self) -> (&str, &str) {
        let name = self.name.trim_matches(self.separator);
        match name.rsplit_once(self.separator) {
            Some((namespace, short)) => (namespace, short),
            None => ("", name),
        }
    }
}

/// A declared property
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDeclaration {
    pub name: String,
    /// Native type expression such as `?int`, `A|B` or `array`
    #[serde(default, rename = "type")]
    pub type_expression: Option<String>,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub generated: OneOrMany<GeneratedProperty>,
}

/// Type level generation attribute
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratedType {
    /// Output type name
    #[serde(default)]
    pub name: Option<String>,
    /// Output namespace, always written with `/`
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
    #[serde(default)]
    pub ignore: bool,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Property level generation attribute, also used for virtual properties
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratedProperty {
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement native types
    #[serde(default, rename = "type")]
    pub types: Option<OneOrMany<String>>,
    #[serde(default)]
    pub collection: bool,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub ignore: bool,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Default for GeneratedProperty {
    fn default() -> Self {
        Self {
            name: None,
            types: None,
            collection: false,
            nullable: true,
            ignore: false,
            groups: Vec::new(),
        }
    }
}

impl GeneratedProperty {
    /// Declared replacement types, empty when none
    pub fn type_list(&self) -> &[String] {
        self.types.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }
}

/// Substitutes a type by another identifier wherever it is referenced
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratedTypeAlias {
    pub name: String,
    #[serde(default)]
    pub groups: Vec<String>,
}
