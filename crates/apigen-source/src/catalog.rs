//! Lookup table of declared types and their inheritance graph

use std::collections::HashSet;

use apigen_core::config::INPUT_SEPARATOR;
use indexmap::IndexMap;

use crate::manifest::TypeDeclaration;

/// Inheritance of well-known native types that never appear in manifests
const BUILTIN_HIERARCHY: &[(&str, &[&str])] = &[
    ("DateTime", &["DateTimeInterface"]),
    ("DateTimeImmutable", &["DateTimeInterface"]),
    ("Iterator", &["Traversable"]),
    ("IteratorAggregate", &["Traversable"]),
    ("Generator", &["Iterator"]),
    ("ArrayIterator", &["Iterator"]),
    ("ArrayObject", &["IteratorAggregate"]),
    ("Symfony\\Component\\Uid\\Ulid", &["Symfony\\Component\\Uid\\AbstractUid"]),
    ("Symfony\\Component\\Uid\\Uuid", &["Symfony\\Component\\Uid\\AbstractUid"]),
    ("Ramsey\\Uuid\\Uuid", &["Ramsey\\Uuid\\UuidInterface"]),
];

/// Native identifiers that are always iterated as collections
const COLLECTION_TYPES: &[&str] = &["array", "iterable"];

const TRAVERSABLE: &str = "Traversable";

/// Strip leading and trailing separators from a native identifier
pub fn normalize_identifier(identifier: &str) -> &str {
    identifier.trim_matches(INPUT_SEPARATOR)
}

#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    declarations: IndexMap<String, TypeDeclaration>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration, returns `false` when the name was already taken
    pub fn insert(&mut self, declaration: TypeDeclaration) -> bool {
        let key = declaration
            .name
            .trim_matches(declaration.separator)
            .to_string();
        if self.declarations.contains_key(&key) {
            return false;
        }
        self.declarations.insert(key, declaration);
        true
    }

    pub fn get(&self, identifier: &str) -> Option<&TypeDeclaration> {
        self.declarations.get(normalize_identifier(identifier))
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    /// Declared native names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Direct supertypes: parent first, then implemented interfaces
    fn supertypes(&self, identifier: &str) -> Vec<String> {
        if let Some(declaration) = self.get(identifier) {
            return declaration
                .parent
                .iter()
                .chain(declaration.implements.iter())
                .map(|s| normalize_identifier(s).to_string())
                .collect();
        }

        BUILTIN_HIERARCHY
            .iter()
            .find(|(name, _)| *name == identifier)
            .map(|(_, parents)| parents.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }

    /// Whether `identifier` is, extends or implements `target`.
    ///
    /// Inheritance cycles in manifests are tolerated.
    pub fn is_subtype_of(&self, identifier: &str, target: &str) -> bool {
        let identifier = normalize_identifier(identifier);
        let target = normalize_identifier(target);

        let mut visited = HashSet::new();
        let mut pending = vec![identifier.to_string()];

        while let Some(current) = pending.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            pending.extend(self.supertypes(&current));
        }

        false
    }

    /// Whether values of this native type are collections
    pub fn is_collection(&self, identifier: &str) -> bool {
        let identifier = normalize_identifier(identifier);
        COLLECTION_TYPES.contains(&identifier)
            || (identifier != TRAVERSABLE && self.is_subtype_of(identifier, TRAVERSABLE))
    }
}
