//! Manifest based type sources for apigen
//!
//! Native types are declared in YAML or JSON manifests instead of being
//! reflected from code. [`ManifestSource`] turns those declarations into
//! input [`apigen_core::TypeNode`]s; [`SourceChain`] combines several sources.

pub mod alias;
pub mod catalog;
pub mod chain;
pub mod error;
pub mod expression;
pub mod manifest;
pub mod manifest_source;

pub use alias::TypeAliasRegistry;
pub use catalog::TypeCatalog;
pub use chain::SourceChain;
pub use error::SourceError;
pub use manifest::Manifest;
pub use manifest_source::ManifestSource;
