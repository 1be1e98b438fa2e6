//! Library interface for the apigen command line

pub mod config;

use anyhow::{Context, Result};
use apigen_codegen::{language_by_name, Generator, LANGUAGES};
use apigen_core::GeneratorContext;
use apigen_source::{ManifestSource, SourceChain, TypeAliasRegistry};
use tracing::{debug, info};

use crate::config::ResolvedTarget;

/// Chain one manifest source per configured source entry
pub fn build_source(target: &ResolvedTarget) -> Result<SourceChain> {
    let mut aliases = TypeAliasRegistry::new();
    for (native, alias) in &target.aliases {
        aliases = aliases.with_alias(native, alias.clone());
    }

    let mut chain = SourceChain::new();
    for path in &target.sources {
        debug!("Loading source {}", path.display());
        let mut source = ManifestSource::from_path(path)
            .with_context(|| format!("Failed to load source: {}", path.display()))?
            .with_aliases(aliases.clone());
        if let Some(types) = &target.types {
            source = source.with_type_list(types);
        }
        chain.push(source);
    }
    Ok(chain)
}

/// Generate every file of a target
pub fn generate_target(target: &ResolvedTarget) -> Result<GeneratorContext> {
    let language = language_by_name(&target.language).with_context(|| {
        format!(
            "Unknown language '{}', available languages: {}",
            target.language,
            LANGUAGES.join(", ")
        )
    })?;
    let source = build_source(target)?;

    info!(
        "Generating target '{}' into {}",
        target.name,
        target.directory.display()
    );
    let context = Generator::new(&source, language.as_ref())
        .generate(
            &target.directory,
            Some(GeneratorContext::new(target.configuration.clone())),
        )
        .with_context(|| format!("Failed to generate target '{}'", target.name))?;

    Ok(context)
}
