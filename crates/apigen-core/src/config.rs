//! Run configuration consumed by the core and by sources

use crate::namespace::{TypeNamespace, OUTPUT_SEPARATOR};

/// Default separator of source namespaces
pub const INPUT_SEPARATOR: char = '\\';

#[derive(Debug, Clone, Default)]
pub struct Configuration {
    /// Prefix removed from input namespaces
    pub namespace_input_prefix: Option<TypeNamespace>,
    /// Prefix added to output namespaces
    pub namespace_output_prefix: Option<TypeNamespace>,
    /// Skip types and properties flagged as internal
    pub ignore_internal: bool,
    /// Active generation groups, `None` means no group is active
    pub groups: Option<Vec<String>>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input prefix, parsed with the input separator. Empty disables it.
    pub fn with_input_prefix(mut self, prefix: &str) -> Self {
        self.namespace_input_prefix = Self::prefix(prefix, INPUT_SEPARATOR);
        self
    }

    /// Set the output prefix, parsed with the output separator. Empty disables it.
    pub fn with_output_prefix(mut self, prefix: &str) -> Self {
        self.namespace_output_prefix = Self::prefix(prefix, OUTPUT_SEPARATOR);
        self
    }

    pub fn with_ignore_internal(mut self, ignore_internal: bool) -> Self {
        self.ignore_internal = ignore_internal;
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    fn prefix(prefix: &str, separator: char) -> Option<TypeNamespace> {
        let namespace = TypeNamespace::new(prefix, separator);
        (!namespace.is_empty()).then_some(namespace)
    }

    /// Whether metadata restricted to `groups` applies to this run.
    ///
    /// Metadata without groups always applies; otherwise at least one of its
    /// groups must be active.
    pub fn accepts_groups(&self, groups: &[String]) -> bool {
        if groups.is_empty() {
            return true;
        }
        match &self.groups {
            Some(active) => groups.iter().any(|g| active.contains(g)),
            None => false,
        }
    }
}
