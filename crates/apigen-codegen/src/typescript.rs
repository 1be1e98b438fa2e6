//! TypeScript interfaces backend
//!
//! One `.ts` file per output namespace (`index.ts` for the root namespace),
//! one `export interface` per type, relative imports between files.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::path::PathBuf;

use apigen_core::namespace::OUTPUT_SEPARATOR;
use apigen_core::{GeneratorContext, OutputFile, Property, TypeNamespace, TypeNode};
use tracing::debug;

use crate::error::CodegenError;
use crate::language::Language;

const INDEX: &str = "index";
const EXTENSION: &str = "ts";
const INDENT: &str = "    ";
/// Rendered when no type could be derived
const ANY: &str = "any";

const PRIMITIVES: &[(&str, &str)] = &[
    ("string", "string"),
    ("resource", "unknown"),
    ("object", "any"),
    ("mixed", "any"),
    ("array", "any"),
    ("int", "number"),
    ("float", "number"),
    ("bool", "boolean"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptLanguage;

impl TypeScriptLanguage {
    pub fn new() -> Self {
        Self
    }

    /// Path segments of the module defining types of `namespace`, without extension
    fn module_path(namespace: &TypeNamespace) -> TypeNamespace {
        if namespace.is_empty() {
            TypeNamespace::new(INDEX, OUTPUT_SEPARATOR)
        } else {
            namespace.convert(OUTPUT_SEPARATOR)
        }
    }

    /// Import path from the file of `from` to the file of `to`
    fn import_path(from: &TypeNamespace, to: &TypeNamespace) -> String {
        let directory = from.pop(1).unwrap_or_else(|_| TypeNamespace::empty(OUTPUT_SEPARATOR));
        let target = Self::module_path(to);
        let (target_directory, module) = match (target.pop(1), target.last_segment()) {
            (Ok(parent), Ok(last)) => (parent, last.to_string()),
            _ => (TypeNamespace::empty(OUTPUT_SEPARATOR), INDEX.to_string()),
        };

        let relative = directory
            .convert(OUTPUT_SEPARATOR)
            .relative(&target_directory, Some("."), "..")
            .join(module.as_str());

        let path = relative.to_string();
        if path.starts_with('.') {
            path
        } else {
            format!("./{}", path)
        }
    }

    fn type_signature(&self, context: &GeneratorContext, property: &Property) -> String {
        let mut names: Vec<&str> = Vec::new();
        for type_id in &property.types {
            let name = match context.get_type(type_id) {
                Some(output) => Some(output.name.as_str()),
                None => self.primitive(type_id),
            };
            if let Some(name) = name {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        let signature = if names.is_empty() {
            ANY.to_string()
        } else {
            names.join("|")
        };

        match (property.collection, names.len() > 1) {
            (true, true) => format!("({})[]", signature),
            (true, false) => format!("{}[]", signature),
            (false, _) => signature,
        }
    }
}

impl Language for TypeScriptLanguage {
    fn name(&self) -> &str {
        "typescript"
    }

    fn target_file(&self, _context: &GeneratorContext, output: &TypeNode) -> PathBuf {
        let module = Self::module_path(&output.namespace);
        PathBuf::from(format!("{}.{}", module, EXTENSION))
    }

    fn render_type(
        &self,
        context: &GeneratorContext,
        output: &TypeNode,
    ) -> Result<String, CodegenError> {
        let mut code = String::new();

        let parent = output
            .parent
            .as_deref()
            .and_then(|parent| context.get_type(parent));
        match parent {
            Some(parent) => writeln!(code, "export interface {} extends {} {{", output.name, parent.name)?,
            None => writeln!(code, "export interface {} {{", output.name)?,
        }

        for property in output.properties.values() {
            let optional = if property.nullable { "?" } else { "" };
            writeln!(
                code,
                "{}readonly {}{}: {};",
                INDENT,
                property.name,
                optional,
                self.type_signature(context, property)
            )?;
        }

        write!(code, "}}")?;
        Ok(code)
    }

    fn render_header(
        &self,
        context: &GeneratorContext,
        file: &OutputFile,
    ) -> Result<String, CodegenError> {
        let mut groups: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();

        for type_id in file.dependencies() {
            let Some(dependency) = context.get_type(type_id) else {
                debug!("Dependency '{}' of {} is not generated", type_id, file.path().display());
                continue;
            };
            let path = Self::import_path(file.namespace(), &dependency.namespace);
            groups.entry(path).or_default().insert(dependency.name.as_str());
        }

        let mut header = String::new();
        for (index, (path, names)) in groups.iter().enumerate() {
            if index > 0 {
                header.push('\n');
            }
            let names: Vec<&str> = names.iter().copied().collect();
            write!(header, "import {{ {} }} from '{}';", names.join(", "), path)?;
        }
        Ok(header)
    }

    fn primitive(&self, identifier: &str) -> Option<&'static str> {
        PRIMITIVES
            .iter()
            .find(|(native, _)| *native == identifier)
            .map(|(_, ts)| *ts)
    }
}
