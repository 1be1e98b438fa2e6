//! Project configuration file (`apigen.toml`)
//!
//! ```toml
//! [defaults]
//! directory = "assets/src"
//! language = "typescript"
//! namespace_prefix_input = "App"
//! sources = ["schema/"]
//!
//! [targets.public]
//! groups = ["public"]
//! namespace_prefix_output = "public"
//! ```
//!
//! Targets inherit every key they leave unset from `[defaults]`. Relative
//! paths are resolved against the directory holding the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use apigen_core::config::INPUT_SEPARATOR;
use apigen_core::{Configuration, TypeNamespace};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default configuration file name
pub const CONFIG_FILE: &str = "apigen.toml";

/// Target used when none is given on the command line
pub const DEFAULT_TARGET: &str = "default";

const DEFAULT_LANGUAGE: &str = "typescript";

/// Settings of one target, every key optional
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSettings {
    /// Output root, must exist
    pub directory: Option<PathBuf>,
    pub language: Option<String>,
    pub namespace_prefix_input: Option<String>,
    pub namespace_prefix_output: Option<String>,
    /// Separator of native namespaces, `\` when unset
    pub input_separator: Option<char>,
    pub ignore_internal: Option<bool>,
    pub groups: Option<Vec<String>>,
    /// Manifest files or directories
    pub sources: Option<Vec<PathBuf>>,
    /// Restrict discovery to these native types
    pub types: Option<Vec<String>>,
    /// Extra type aliases, native name to alias
    pub aliases: Option<IndexMap<String, String>>,
}

impl TargetSettings {
    /// Fill unset keys from `defaults`
    pub fn inherit(&self, defaults: &TargetSettings) -> TargetSettings {
        TargetSettings {
            directory: self.directory.clone().or_else(|| defaults.directory.clone()),
            language: self.language.clone().or_else(|| defaults.language.clone()),
            namespace_prefix_input: self
                .namespace_prefix_input
                .clone()
                .or_else(|| defaults.namespace_prefix_input.clone()),
            namespace_prefix_output: self
                .namespace_prefix_output
                .clone()
                .or_else(|| defaults.namespace_prefix_output.clone()),
            input_separator: self.input_separator.or(defaults.input_separator),
            ignore_internal: self.ignore_internal.or(defaults.ignore_internal),
            groups: self.groups.clone().or_else(|| defaults.groups.clone()),
            sources: self.sources.clone().or_else(|| defaults.sources.clone()),
            types: self.types.clone().or_else(|| defaults.types.clone()),
            aliases: self.aliases.clone().or_else(|| defaults.aliases.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub defaults: TargetSettings,
    #[serde(default)]
    pub targets: IndexMap<String, TargetSettings>,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// A target with inheritance applied and paths made absolute
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub name: String,
    pub directory: PathBuf,
    pub language: String,
    pub configuration: Configuration,
    pub sources: Vec<PathBuf>,
    pub types: Option<Vec<String>>,
    pub aliases: IndexMap<String, String>,
}

impl ProjectConfig {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Configured target names; `default` stands for `[defaults]` alone
    pub fn target_names(&self) -> Vec<&str> {
        if self.targets.is_empty() {
            return vec![DEFAULT_TARGET];
        }
        self.targets.keys().map(String::as_str).collect()
    }

    pub fn resolve(&self, name: &str) -> Result<ResolvedTarget> {
        let settings = match self.targets.get(name) {
            Some(target) => target.inherit(&self.defaults),
            None if name == DEFAULT_TARGET && self.targets.is_empty() => self.defaults.clone(),
            None => bail!(
                "Unknown target '{}', available targets: {}",
                name,
                self.target_names().join(", ")
            ),
        };

        let Some(directory) = settings.directory.as_deref() else {
            bail!("Target '{}' has no output directory", name);
        };
        let sources = settings.sources.clone().unwrap_or_default();
        if sources.is_empty() {
            bail!("Target '{}' has no sources", name);
        }

        Ok(ResolvedTarget {
            name: name.to_string(),
            directory: self.absolute(directory),
            language: settings
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            configuration: Self::configuration(&settings),
            sources: sources.iter().map(|s| self.absolute(s)).collect(),
            types: settings.types.clone(),
            aliases: settings.aliases.clone().unwrap_or_default(),
        })
    }

    fn configuration(settings: &TargetSettings) -> Configuration {
        let separator = settings.input_separator.unwrap_or(INPUT_SEPARATOR);

        let mut configuration = Configuration::new()
            .with_output_prefix(settings.namespace_prefix_output.as_deref().unwrap_or_default())
            .with_ignore_internal(settings.ignore_internal.unwrap_or(false));

        configuration.namespace_input_prefix = settings
            .namespace_prefix_input
            .as_deref()
            .map(|prefix| TypeNamespace::new(prefix, separator))
            .filter(|prefix| !prefix.is_empty());

        if let Some(groups) = &settings.groups {
            configuration = configuration.with_groups(groups.iter().cloned());
        }
        configuration
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
