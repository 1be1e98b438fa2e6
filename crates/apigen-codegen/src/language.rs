//! Contract implemented by every output language

use std::path::PathBuf;

use apigen_core::namespace::OUTPUT_SEPARATOR;
use apigen_core::{GeneratorContext, OutputFile, TypeNode};

use crate::error::CodegenError;
use crate::typescript::TypeScriptLanguage;

/// An output language backend.
///
/// Implementations hold no per-run state: everything they need is read from
/// the [`GeneratorContext`] they are given.
pub trait Language {
    /// Short identifier used on the command line
    fn name(&self) -> &str;

    /// Hook called once before resolution starts
    fn prepare_context(&self, _context: &mut GeneratorContext) {}

    /// Create the output node for an input node, without parent nor
    /// properties. Returning `None` skips the type for the whole run.
    ///
    /// The output node must carry the identity of the input node.
    fn shell_type(&self, context: &GeneratorContext, input: &TypeNode) -> Option<TypeNode> {
        let namespace = context.resolve_namespace(&input.namespace, Some(OUTPUT_SEPARATOR));
        let mut output = TypeNode::new(input.name.clone(), namespace)
            .with_native_name(input.id())
            .with_usage(input.usage.clone())
            .with_abstract(input.is_abstract);
        output.source = Some(Box::new(input.clone()));
        Some(output)
    }

    /// File holding `output`, relative to the output root
    fn target_file(&self, context: &GeneratorContext, output: &TypeNode) -> PathBuf;

    /// Code block declaring `output`
    fn render_type(
        &self,
        context: &GeneratorContext,
        output: &TypeNode,
    ) -> Result<String, CodegenError>;

    /// File header, where imports go
    fn render_header(
        &self,
        context: &GeneratorContext,
        file: &OutputFile,
    ) -> Result<String, CodegenError>;

    /// Native type of this language for a source primitive identifier
    fn primitive(&self, identifier: &str) -> Option<&'static str>;
}

/// Names of the built-in languages
pub const LANGUAGES: &[&str] = &["typescript"];

/// Look up a built-in language by name
pub fn language_by_name(name: &str) -> Option<Box<dyn Language>> {
    match name.to_ascii_lowercase().as_str() {
        "typescript" | "ts" => Some(Box::new(TypeScriptLanguage::new())),
        _ => None,
    }
}
