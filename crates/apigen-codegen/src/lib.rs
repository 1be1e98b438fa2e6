//! Generation orchestrator and language backends for apigen

pub mod error;
pub mod generator;
pub mod language;
pub mod typescript;

pub use error::CodegenError;
pub use generator::Generator;
pub use language::{language_by_name, Language, LANGUAGES};
pub use typescript::TypeScriptLanguage;
