//! End to end generation from manifests to TypeScript files

use std::fs;
use std::path::{Path, PathBuf};

use apigen_codegen::{CodegenError, Generator, Language, TypeScriptLanguage};
use apigen_core::{Configuration, CoreError, GeneratorContext, OutputFile, TypeNode};
use apigen_source::ManifestSource;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const MOCKS: &str = r#"
types:
  - name: App\Mock\ClassNameChange
    generated:
      name: ChangedName
    properties:
      - { name: id, type: int }

  - name: App\Mock\ClassNamespaceChange
    generated:
      namespace: api/interface
    properties:
      - { name: id, type: int }

  - name: App\Mock\SomeEntity
    properties:
      - { name: id, type: string }

  - name: App\Mock\SomeId
    alias: { name: string }
    properties:
      - { name: realId, type: string }

  - name: App\Mock\ClassAliasedClass
    alias: { name: \App\Mock\SomeEntity }
    properties:
      - { name: id, type: int }

  - name: App\Mock\ClassAliasedAliasedClass
    alias: { name: App\Mock\SomeId }
    properties:
      - { name: id, type: int }

  - name: App\Mock\ClassAliasedPrimitive
    alias: { name: string }
    properties:
      - { name: id, type: int }

  - name: App\Mock\ClassIgnored
    generated: { ignore: true }
    properties:
      - { name: id, type: int }

  - name: App\Mock\ClassAliasedClassHolder
    properties:
      - { name: property, type: App\Mock\ClassAliasedClass }

  - name: App\Mock\ClassAliasedAliasedClassHolder
    properties:
      - { name: property, type: App\Mock\ClassAliasedAliasedClass }

  - name: App\Mock\ClassAliasedPrimitiveHolder
    properties:
      - { name: property, type: App\Mock\ClassAliasedPrimitive }

  - name: App\Mock\ClassIgnoredHolder
    properties:
      - { name: property, type: App\Mock\ClassIgnored }

  - name: App\Mock\NullableId
    properties:
      - { name: id, type: "?int" }

  - name: App\Mock\AliasedInNamespace
    generated:
      namespace: api/interface
    properties:
      - { name: id, type: App\Mock\SomeId }

  - name: App\Mock\CollapsedUnion
    properties:
      - { name: id, type: "App\\Mock\\SomeId|App\\Mock\\ClassAliasedPrimitive" }

  - name: App\Mock\PropertyChangeName
    properties:
      - name: propertyWithAChangedName
        type: mixed
        generated: { name: changedPropertyName }

  - name: App\Mock\PropertyTypeChange
    properties:
      - name: propertyTypeChanged
        type: mixed
        generated: { type: string, collection: true, nullable: false }

  - name: App\Mock\PropertyIgnore
    properties:
      - name: ignoredProperty
        type: mixed
        generated: { ignore: true }
"#;

const GRAPH: &str = r#"
types:
  - name: App\Base\Parent
    abstract: true
    properties:
      - { name: id, type: int }

  - name: App\Model\Child
    parent: App\Base\Parent
    properties:
      - { name: name, type: string }
      - { name: sibling, type: "?App\\Model\\Child" }
      - { name: owner, type: "App\\Base\\Owner|null" }
      - { name: missing, type: App\Nowhere\Missing }

  - name: App\Base\Owner
    properties:
      - { name: children, type: "array" }
      - { name: first, type: App\Model\Child }

  - name: App\Cycle\A
    alias: { name: App\Cycle\B }

  - name: App\Cycle\B
    alias: { name: App\Cycle\A }

  - name: App\Cycle\Holder
    properties:
      - { name: looping, type: App\Cycle\A }
"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn mocks(types: &[&str]) -> Result<ManifestSource, Box<dyn std::error::Error>> {
    let types: Vec<String> = types.iter().map(|t| format!("App\\Mock\\{}", t)).collect();
    Ok(ManifestSource::from_yaml_str(MOCKS)?.with_type_list(types))
}

fn mock_configuration() -> Configuration {
    Configuration::new().with_input_prefix("App\\Mock")
}

fn generate(
    source: &ManifestSource,
    configuration: Configuration,
) -> Result<(TempDir, GeneratorContext), Box<dyn std::error::Error>> {
    init_tracing();
    let dir = TempDir::new()?;
    let language = TypeScriptLanguage::new();
    let context = Generator::new(source, &language)
        .generate(dir.path(), Some(GeneratorContext::new(configuration)))?;
    Ok((dir, context))
}

fn read(dir: &Path, file: &str) -> Result<String, Box<dyn std::error::Error>> {
    Ok(fs::read_to_string(dir.join(file))?.trim().to_string())
}

#[test]
fn test_class_name_change() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, _) = generate(&mocks(&["ClassNameChange"])?, mock_configuration())?;

    let raw = fs::read_to_string(dir.path().join("index.ts"))?;
    assert_eq!(
        raw,
        "\n\nexport interface ChangedName {\n    readonly id: number;\n}\n"
    );
    Ok(())
}

#[test]
fn test_class_namespace_change() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, _) = generate(&mocks(&["ClassNamespaceChange"])?, mock_configuration())?;

    assert_eq!(
        read(dir.path(), "api/interface.ts")?,
        "export interface ClassNamespaceChange {\n    readonly id: number;\n}"
    );
    assert!(!dir.path().join("index.ts").exists());
    Ok(())
}

#[test]
fn test_nullable_primitive_at_root() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, _) = generate(&mocks(&["NullableId"])?, mock_configuration())?;

    assert_eq!(
        read(dir.path(), "index.ts")?,
        "export interface NullableId {\n    readonly id?: number;\n}"
    );
    Ok(())
}

#[test]
fn test_aliased_property_in_namespace_has_no_import() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, context) = generate(&mocks(&["AliasedInNamespace"])?, mock_configuration())?;

    let raw = fs::read_to_string(dir.path().join("api/interface.ts"))?;
    assert_eq!(
        raw,
        "\n\nexport interface AliasedInNamespace {\n    readonly id: string;\n}\n"
    );
    assert!(!dir.path().join("index.ts").exists());

    let files: Vec<&OutputFile> = context.files().collect();
    assert_eq!(files.len(), 1);
    assert!(!files[0].has_dependencies());
    Ok(())
}

#[test]
fn test_union_collapsed_by_aliases() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, context) = generate(&mocks(&["CollapsedUnion"])?, mock_configuration())?;

    let union = context
        .get_type("App\\Mock\\CollapsedUnion")
        .ok_or("union missing")?;
    assert_eq!(union.properties["id"].types, vec!["string"]);
    assert!(!union.properties["id"].is_sum_type);
    assert_eq!(
        read(dir.path(), "index.ts")?,
        "export interface CollapsedUnion {\n    readonly id: string;\n}"
    );
    Ok(())
}

#[test]
fn test_class_aliased_class() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, context) = generate(&mocks(&["ClassAliasedClassHolder"])?, mock_configuration())?;

    assert_eq!(
        read(dir.path(), "index.ts")?,
        "export interface ClassAliasedClassHolder {\n    readonly property: SomeEntity;\n}\n\n\
         export interface SomeEntity {\n    readonly id: string;\n}"
    );
    assert!(!context.has_type("App\\Mock\\ClassAliasedClass"));
    Ok(())
}

#[test]
fn test_class_aliased_aliased_class() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, context) = generate(
        &mocks(&["ClassAliasedAliasedClassHolder"])?,
        mock_configuration(),
    )?;

    assert_eq!(
        read(dir.path(), "index.ts")?,
        "export interface ClassAliasedAliasedClassHolder {\n    readonly property: string;\n}"
    );
    assert!(!context.has_type("App\\Mock\\SomeId"));
    Ok(())
}

#[test]
fn test_class_aliased_primitive() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, _) = generate(
        &mocks(&["ClassAliasedPrimitiveHolder"])?,
        mock_configuration(),
    )?;

    assert_eq!(
        read(dir.path(), "index.ts")?,
        "export interface ClassAliasedPrimitiveHolder {\n    readonly property: string;\n}"
    );
    Ok(())
}

#[test]
fn test_class_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, context) = generate(&mocks(&["ClassIgnoredHolder"])?, mock_configuration())?;

    assert_eq!(
        read(dir.path(), "index.ts")?,
        "export interface ClassIgnoredHolder {\n    readonly property: any;\n}"
    );
    let holder = context
        .get_type("App\\Mock\\ClassIgnoredHolder")
        .ok_or("holder missing")?;
    assert!(holder.properties["property"].types.is_empty());
    Ok(())
}

#[test]
fn test_property_name_change() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, _) = generate(&mocks(&["PropertyChangeName"])?, mock_configuration())?;

    assert_eq!(
        read(dir.path(), "index.ts")?,
        "export interface PropertyChangeName {\n    readonly changedPropertyName?: any;\n}"
    );
    Ok(())
}

#[test]
fn test_property_type_change() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, _) = generate(&mocks(&["PropertyTypeChange"])?, mock_configuration())?;

    assert_eq!(
        read(dir.path(), "index.ts")?,
        "export interface PropertyTypeChange {\n    readonly propertyTypeChanged: string[];\n}"
    );
    Ok(())
}

#[test]
fn test_property_ignore() -> Result<(), Box<dyn std::error::Error>> {
    let (dir, _) = generate(&mocks(&["PropertyIgnore"])?, mock_configuration())?;

    assert_eq!(
        read(dir.path(), "index.ts")?,
        "export interface PropertyIgnore {\n}"
    );
    Ok(())
}

#[test]
fn test_same_identity_resolved_once() -> Result<(), Box<dyn std::error::Error>> {
    let source = mocks(&["SomeEntity", "ClassAliasedClassHolder"])?;
    let (dir, context) = generate(&source, mock_configuration())?;

    let entities = context.types().filter(|t| t.name == "SomeEntity").count();
    assert_eq!(entities, 1);
    assert_eq!(context.type_count(), 2);

    let content = read(dir.path(), "index.ts")?;
    assert_eq!(content.matches("export interface SomeEntity").count(), 1);
    Ok(())
}

#[test]
fn test_cross_namespace_graph() -> Result<(), Box<dyn std::error::Error>> {
    let source = ManifestSource::from_yaml_str(GRAPH)?.with_type_list(["App\\Model\\Child"]);
    let (dir, context) = generate(&source, Configuration::new().with_input_prefix("App"))?;

    // Child, its parent, and Owner reached through a property
    let ids: Vec<_> = context.type_ids().collect();
    assert_eq!(
        ids,
        vec!["App\\Model\\Child", "App\\Base\\Parent", "App\\Base\\Owner"]
    );

    assert_eq!(
        read(dir.path(), "Model.ts")?,
        "import { Owner, Parent } from './Base';\n\n\
         export interface Child extends Parent {\n\
         \x20   readonly name: string;\n\
         \x20   readonly sibling?: Child;\n\
         \x20   readonly owner?: Owner;\n\
         \x20   readonly missing: any;\n\
         }"
    );
    assert_eq!(
        read(dir.path(), "Base.ts")?,
        "import { Child } from './Model';\n\n\
         export interface Parent {\n\
         \x20   readonly id: number;\n\
         }\n\n\
         export interface Owner {\n\
         \x20   readonly children: any[];\n\
         \x20   readonly first: Child;\n\
         }"
    );

    let child = context.get_type("App\\Model\\Child").ok_or("child missing")?;
    assert!(child.properties["missing"].types.is_empty());
    assert_eq!(child.properties["sibling"].types, vec!["App\\Model\\Child"]);
    Ok(())
}

#[test]
fn test_same_namespace_has_no_import() -> Result<(), Box<dyn std::error::Error>> {
    let source = mocks(&["ClassAliasedClassHolder"])?;
    let (_, context) = generate(&source, mock_configuration())?;

    let files: Vec<&OutputFile> = context.files().collect();
    assert_eq!(files.len(), 1);
    assert!(!files[0].has_dependencies());
    Ok(())
}

#[test]
fn test_alias_cycle_terminates() -> Result<(), Box<dyn std::error::Error>> {
    let source = ManifestSource::from_yaml_str(GRAPH)?.with_type_list(["App\\Cycle\\Holder"]);
    let (dir, context) = generate(&source, Configuration::new().with_input_prefix("App"))?;

    // the chase stops at the last identifier not seen yet
    let ids: Vec<_> = context.type_ids().collect();
    assert_eq!(ids, vec!["App\\Cycle\\Holder", "App\\Cycle\\B"]);
    assert_eq!(
        read(dir.path(), "Cycle.ts")?,
        "export interface Holder {\n    readonly looping: B;\n}\n\nexport interface B {\n}"
    );
    Ok(())
}

#[test]
fn test_output_prefix() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = mock_configuration().with_output_prefix("generated/api");
    let (dir, context) = generate(&mocks(&["ClassNameChange"])?, configuration)?;

    assert!(dir.path().join("generated/api.ts").is_file());
    let output = context
        .get_type("App\\Mock\\ClassNameChange")
        .ok_or("type missing")?;
    assert_eq!(output.namespace.to_string(), "generated/api");
    Ok(())
}

#[test]
fn test_stale_file_is_overwritten() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let source = mocks(&["ClassNameChange"])?;
    let language = TypeScriptLanguage::new();

    let fresh = TempDir::new()?;
    Generator::new(&source, &language).generate(
        fresh.path(),
        Some(GeneratorContext::new(mock_configuration())),
    )?;

    let stale = TempDir::new()?;
    let leftover = "// stale content longer than the output\n".repeat(20);
    fs::write(stale.path().join("index.ts"), leftover)?;
    Generator::new(&source, &language).generate(
        stale.path(),
        Some(GeneratorContext::new(mock_configuration())),
    )?;

    assert_eq!(
        fs::read_to_string(stale.path().join("index.ts"))?,
        fs::read_to_string(fresh.path().join("index.ts"))?
    );
    Ok(())
}

#[test]
fn test_output_is_reproducible() -> Result<(), Box<dyn std::error::Error>> {
    let source = ManifestSource::from_yaml_str(GRAPH)?;
    let configuration = || Configuration::new().with_input_prefix("App");

    let (first, _) = generate(&source, configuration())?;
    let (second, _) = generate(&source, configuration())?;

    for file in ["Model.ts", "Base.ts", "Cycle.ts"] {
        assert_eq!(read(first.path(), file)?, read(second.path(), file)?);
    }
    Ok(())
}

#[test]
fn test_missing_output_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("does/not/exist");
    let source = mocks(&["ClassNameChange"])?;
    let language = TypeScriptLanguage::new();

    let err = Generator::new(&source, &language)
        .generate(&missing, None)
        .unwrap_err();
    assert!(matches!(err, CodegenError::DirectoryNotFound(path) if path == missing));
    Ok(())
}

/// Puts every type into one file
struct SingleFileLanguage(TypeScriptLanguage);

impl Language for SingleFileLanguage {
    fn name(&self) -> &str {
        "single-file"
    }

    fn target_file(&self, _context: &GeneratorContext, _output: &TypeNode) -> PathBuf {
        PathBuf::from("all.ts")
    }

    fn render_type(
        &self,
        context: &GeneratorContext,
        output: &TypeNode,
    ) -> Result<String, CodegenError> {
        self.0.render_type(context, output)
    }

    fn render_header(
        &self,
        context: &GeneratorContext,
        file: &OutputFile,
    ) -> Result<String, CodegenError> {
        self.0.render_header(context, file)
    }

    fn primitive(&self, identifier: &str) -> Option<&'static str> {
        self.0.primitive(identifier)
    }
}

#[test]
fn test_namespace_mismatch_on_shared_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let source = mocks(&["ClassNameChange", "ClassNamespaceChange"])?;
    let language = SingleFileLanguage(TypeScriptLanguage::new());

    let err = Generator::new(&source, &language)
        .generate(dir.path(), Some(GeneratorContext::new(mock_configuration())))
        .unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Core(CoreError::NamespaceMismatch { .. })
    ));
    Ok(())
}

/// Declines every type whose name ends with `Entity`
struct PickyLanguage(TypeScriptLanguage);

impl Language for PickyLanguage {
    fn name(&self) -> &str {
        "picky"
    }

    fn shell_type(&self, context: &GeneratorContext, input: &TypeNode) -> Option<TypeNode> {
        if input.name.ends_with("Entity") {
            return None;
        }
        self.0.shell_type(context, input)
    }

    fn target_file(&self, context: &GeneratorContext, output: &TypeNode) -> PathBuf {
        self.0.target_file(context, output)
    }

    fn render_type(
        &self,
        context: &GeneratorContext,
        output: &TypeNode,
    ) -> Result<String, CodegenError> {
        self.0.render_type(context, output)
    }

    fn render_header(
        &self,
        context: &GeneratorContext,
        file: &OutputFile,
    ) -> Result<String, CodegenError> {
        self.0.render_header(context, file)
    }

    fn primitive(&self, identifier: &str) -> Option<&'static str> {
        self.0.primitive(identifier)
    }
}

#[test]
fn test_declined_type_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let source = mocks(&["SomeEntity", "ClassAliasedClassHolder"])?;
    let language = PickyLanguage(TypeScriptLanguage::new());

    let context = Generator::new(&source, &language)
        .generate(dir.path(), Some(GeneratorContext::new(mock_configuration())))?;

    assert!(context.is_skipped("App\\Mock\\SomeEntity"));
    assert!(!context.has_type("App\\Mock\\SomeEntity"));
    assert_eq!(
        read(dir.path(), "index.ts")?,
        "export interface ClassAliasedClassHolder {\n    readonly property: any;\n}"
    );
    Ok(())
}

/// Produces output nodes under a different identity
struct RenamingLanguage(TypeScriptLanguage);

impl Language for RenamingLanguage {
    fn name(&self) -> &str {
        "renaming"
    }

    fn shell_type(&self, context: &GeneratorContext, input: &TypeNode) -> Option<TypeNode> {
        self.0
            .shell_type(context, input)
            .map(|output| output.with_native_name(format!("Renamed\\{}", input.name)))
    }

    fn target_file(&self, context: &GeneratorContext, output: &TypeNode) -> PathBuf {
        self.0.target_file(context, output)
    }

    fn render_type(
        &self,
        context: &GeneratorContext,
        output: &TypeNode,
    ) -> Result<String, CodegenError> {
        self.0.render_type(context, output)
    }

    fn render_header(
        &self,
        context: &GeneratorContext,
        file: &OutputFile,
    ) -> Result<String, CodegenError> {
        self.0.render_header(context, file)
    }

    fn primitive(&self, identifier: &str) -> Option<&'static str> {
        self.0.primitive(identifier)
    }
}

#[test]
fn test_identity_mismatch_aborts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let source = mocks(&["ClassNameChange"])?;
    let language = RenamingLanguage(TypeScriptLanguage::new());

    let err = Generator::new(&source, &language)
        .generate(dir.path(), None)
        .unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Core(CoreError::IdentityMismatch { .. })
    ));
    assert!(!dir.path().join("index.ts").exists());
    Ok(())
}
