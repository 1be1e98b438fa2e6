//! Type graph nodes and their properties
//!
//! The same [`TypeNode`] shape represents a type read from a source and the
//! type generated from it. Output nodes refer to their parent by identity,
//! the context acting as the arena that owns every node of a run.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::namespace::TypeNamespace;

/// Marker joining namespace and name when a type has no native name
pub const IDENTITY_MARKER: &str = "###";

/// Arbitrary classification of a type, left for language plugins to interpret
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    #[default]
    Entity,
    Event,
    Message,
    #[serde(untagged)]
    Custom(String),
}

impl Usage {
    pub fn as_str(&self) -> &str {
        match self {
            Usage::Entity => "entity",
            Usage::Event => "event",
            Usage::Message => "message",
            Usage::Custom(s) => s,
        }
    }
}

impl From<&str> for Usage {
    fn from(s: &str) -> Self {
        match s {
            "entity" => Usage::Entity,
            "event" => Usage::Event,
            "message" => Usage::Message,
            other => Usage::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property of a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    /// Candidate native type identifiers, deduplicated, in declaration order.
    ///
    /// Empty means the type could not be determined.
    pub types: Vec<String>,
    pub is_sum_type: bool,
    pub nullable: bool,
    pub collection: bool,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
            is_sum_type: false,
            nullable: true,
            collection: false,
        }
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.clear();
        for ty in types {
            self.push_type(ty);
        }
        self
    }

    pub fn with_type(self, ty: impl Into<String>) -> Self {
        self.with_types([ty])
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn collection(mut self, collection: bool) -> Self {
        self.collection = collection;
        self
    }

    /// Append a type identifier unless it is already present
    pub fn push_type(&mut self, ty: impl Into<String>) {
        let ty = ty.into();
        if !self.types.contains(&ty) {
            self.types.push(ty);
        }
    }
}

/// An input or output type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    /// Local name (e.g. "User")
    pub name: String,
    pub namespace: TypeNamespace,
    /// Fully qualified native name, used as identity when known
    pub native_name: Option<String>,
    pub usage: Usage,
    pub is_abstract: bool,
    /// Identity of the parent type
    pub parent: Option<String>,
    /// Properties keyed by name, in declaration order
    pub properties: IndexMap<String, Property>,
    /// Input node this output node was derived from
    pub source: Option<Box<TypeNode>>,
}

impl TypeNode {
    pub fn new(name: impl Into<String>, namespace: TypeNamespace) -> Self {
        Self {
            name: name.into(),
            namespace,
            native_name: None,
            usage: Usage::default(),
            is_abstract: false,
            parent: None,
            properties: IndexMap::new(),
            source: None,
        }
    }

    pub fn with_native_name(mut self, native_name: impl Into<String>) -> Self {
        self.native_name = Some(native_name.into());
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add a property, keeping the first one registered under a given name.
    ///
    /// Returns `false` when the name was already taken.
    pub fn add_property(&mut self, property: Property) -> bool {
        if self.properties.contains_key(&property.name) {
            return false;
        }
        self.properties.insert(property.name.clone(), property);
        true
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.add_property(property);
        self
    }

    /// Stable identity used to deduplicate this type across a run
    pub fn id(&self) -> String {
        match &self.native_name {
            Some(native_name) => native_name.clone(),
            None => format!("{}{}{}", self.namespace, IDENTITY_MARKER, self.name),
        }
    }
}
