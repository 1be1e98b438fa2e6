//! Type graph, namespace algebra and resolution context for apigen

pub mod config;
pub mod context;
pub mod error;
pub mod namespace;
pub mod output;
pub mod source;
pub mod types;

pub use config::Configuration;
pub use context::GeneratorContext;
pub use error::CoreError;
pub use namespace::TypeNamespace;
pub use output::OutputFile;
pub use source::Source;
pub use types::{Property, TypeNode, Usage};
