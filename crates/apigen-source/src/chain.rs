//! Several sources queried as one

use apigen_core::{Configuration, CoreError, Source, TypeNode};

/// Chain of responsibility over sources.
///
/// Discovery concatenates every source in order; lookups return the first
/// answer.
#[derive(Default)]
pub struct SourceChain {
    sources: Vec<Box<dyn Source>>,
}

impl SourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl Source + 'static) -> Self {
        self.push(source);
        self
    }

    pub fn push(&mut self, source: impl Source + 'static) {
        self.sources.push(Box::new(source));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Source for SourceChain {
    fn find_types(&self, configuration: &Configuration) -> Result<Vec<TypeNode>, CoreError> {
        let mut found = Vec::new();
        for source in &self.sources {
            found.extend(source.find_types(configuration)?);
        }
        Ok(found)
    }

    fn resolve_type(
        &self,
        configuration: &Configuration,
        identifier: &str,
    ) -> Result<Option<TypeNode>, CoreError> {
        for source in &self.sources {
            if let Some(found) = source.resolve_type(configuration, identifier)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn resolve_alias(
        &self,
        configuration: &Configuration,
        identifier: &str,
    ) -> Result<Option<String>, CoreError> {
        for source in &self.sources {
            if let Some(alias) = source.resolve_alias(configuration, identifier)? {
                return Ok(Some(alias));
            }
        }
        Ok(None)
    }
}
