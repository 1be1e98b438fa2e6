//! Type aliases: types rendered as another identifier wherever referenced

use apigen_core::Configuration;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::catalog::{normalize_identifier, TypeCatalog};
use crate::error::SourceError;

/// Aliases applied to a type, or to anything extending or implementing it
pub const WELL_KNOWN_ALIASES: &[(&str, &str)] = &[
    ("Symfony\\Component\\Uid\\AbstractUid", "string"),
    ("DateTimeInterface", "string"),
    ("Ramsey\\Uuid\\UuidInterface", "string"),
];

#[derive(Debug, Clone)]
pub struct TypeAliasRegistry {
    entries: IndexMap<String, String>,
}

impl Default for TypeAliasRegistry {
    fn default() -> Self {
        Self {
            entries: WELL_KNOWN_ALIASES
                .iter()
                .map(|(native, alias)| (native.to_string(), alias.to_string()))
                .collect(),
        }
    }
}

impl TypeAliasRegistry {
    /// Registry preloaded with the well-known aliases
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry without any entry
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Alias `native` and all of its subtypes to `alias`
    pub fn with_alias(mut self, native: impl AsRef<str>, alias: impl Into<String>) -> Self {
        self.entries
            .insert(normalize_identifier(native.as_ref()).to_string(), alias.into());
        self
    }

    /// Alias of a native type, if any.
    ///
    /// Registry entries win over the alias attribute declared on the type.
    pub fn get_type_alias(
        &self,
        configuration: &Configuration,
        catalog: &TypeCatalog,
        native: &str,
    ) -> Result<Option<String>, SourceError> {
        let native = normalize_identifier(native);

        for (target, alias) in &self.entries {
            if catalog.is_subtype_of(native, target) {
                debug!("'{}' is aliased to '{}' through '{}'", native, alias, target);
                return Ok(Some(alias.clone()));
            }
        }

        let Some(declaration) = catalog.get(native) else {
            return Ok(None);
        };

        let mut found: Option<&str> = None;
        for attr in declaration.alias.as_slice() {
            if !configuration.accepts_groups(&attr.groups) {
                info!("'{}' alias is ignored using attribute (unmatched groups)", native);
                continue;
            }
            if found.is_some() {
                warn!("'{}' more than one attribute compete for aliases", native);
                return Err(SourceError::CompetingAttributes {
                    target: native.to_string(),
                    kind: "alias",
                });
            }
            found = Some(normalize_identifier(&attr.name));
        }

        if let Some(alias) = found {
            debug!("'{}' is aliased to '{}' using attribute", native, alias);
        }
        Ok(found.map(str::to_string))
    }
}
