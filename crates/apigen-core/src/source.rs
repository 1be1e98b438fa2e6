//! Contract for collaborators that provide input types

use crate::config::Configuration;
use crate::error::CoreError;
use crate::types::TypeNode;

/// Provides input type nodes to the generator.
///
/// How the nodes are produced (manifests, reflection, remote schemas) is
/// entirely up to the implementation.
pub trait Source {
    /// Every type that should be generated, in discovery order
    fn find_types(&self, configuration: &Configuration) -> Result<Vec<TypeNode>, CoreError>;

    /// Look up a single type by native identifier
    fn resolve_type(
        &self,
        configuration: &Configuration,
        identifier: &str,
    ) -> Result<Option<TypeNode>, CoreError>;

    /// Declared substitution for a native identifier, if any
    fn resolve_alias(
        &self,
        configuration: &Configuration,
        identifier: &str,
    ) -> Result<Option<String>, CoreError>;
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn find_types(&self, configuration: &Configuration) -> Result<Vec<TypeNode>, CoreError> {
        (**self).find_types(configuration)
    }

    fn resolve_type(
        &self,
        configuration: &Configuration,
        identifier: &str,
    ) -> Result<Option<TypeNode>, CoreError> {
        (**self).resolve_type(configuration, identifier)
    }

    fn resolve_alias(
        &self,
        configuration: &Configuration,
        identifier: &str,
    ) -> Result<Option<String>, CoreError> {
        (**self).resolve_alias(configuration, identifier)
    }
}
