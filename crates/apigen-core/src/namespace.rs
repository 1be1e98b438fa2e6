//! Hierarchical namespace values with a configurable separator
//!
//! A [`TypeNamespace`] is the single representation used for both source
//! namespaces (e.g. `App\Entity`) and output namespaces (e.g. `api/entity`).
//! Values are immutable: every operation returns a new namespace.
//!
//! ## Usage
//!
//! ```
//! use apigen_core::namespace::TypeNamespace;
//!
//! let ns = TypeNamespace::new("App\\Entity\\User", '\\');
//! let out = ns.shift("App").unshift("api").convert('/');
//! assert_eq!(out.to_string(), "api/Entity/User");
//!
//! let from = TypeNamespace::new("api/entity", '/');
//! assert_eq!(from.relative("api/dto", Some("."), "..").to_string(), "../dto");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::CoreError;

/// Default separator for output namespaces.
pub const OUTPUT_SEPARATOR: char = '/';

/// An ordered list of non-empty segments plus the separator used to render them
#[derive(Debug, Clone, Eq)]
pub struct TypeNamespace {
    segments: Vec<String>,
    separator: char,
}

/// Anything that can be interpreted as a namespace relative to another one.
///
/// Strings are split on the separator of the namespace they are combined
/// with; namespaces have their segments re-split on it.
pub trait IntoNamespace {
    fn into_namespace(self, separator: char) -> TypeNamespace;
}

impl IntoNamespace for TypeNamespace {
    fn into_namespace(self, separator: char) -> TypeNamespace {
        if self.separator == separator {
            return self;
        }
        TypeNamespace::from_segments(self.segments, separator)
    }
}

impl IntoNamespace for &TypeNamespace {
    fn into_namespace(self, separator: char) -> TypeNamespace {
        self.convert(separator)
    }
}

impl IntoNamespace for &str {
    fn into_namespace(self, separator: char) -> TypeNamespace {
        TypeNamespace::new(self, separator)
    }
}

impl IntoNamespace for String {
    fn into_namespace(self, separator: char) -> TypeNamespace {
        TypeNamespace::new(&self, separator)
    }
}

impl IntoNamespace for &String {
    fn into_namespace(self, separator: char) -> TypeNamespace {
        TypeNamespace::new(self, separator)
    }
}

impl TypeNamespace {
    /// Parse a namespace string, dropping empty segments
    pub fn new(name: &str, separator: char) -> Self {
        Self {
            segments: name
                .split(separator)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            separator,
        }
    }

    /// Build from already split segments.
    ///
    /// Segments are re-split on the separator so that no stored segment ever
    /// contains it.
    pub fn from_segments<I, S>(segments: I, separator: char) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = segments
            .into_iter()
            .flat_map(|segment| {
                segment
                    .as_ref()
                    .split(separator)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self {
            segments,
            separator,
        }
    }

    /// The root namespace
    pub fn empty(separator: char) -> Self {
        Self {
            segments: Vec::new(),
            separator,
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check whether every segment of `prefix` matches our leading segments
    pub fn starts_with(&self, prefix: impl IntoNamespace) -> bool {
        let prefix = prefix.into_namespace(self.separator);
        prefix.segments.len() <= self.segments.len()
            && prefix
                .segments
                .iter()
                .zip(&self.segments)
                .all(|(a, b)| a == b)
    }

    /// Remove `prefix` from the front if it matches, otherwise return self unchanged
    pub fn shift(&self, prefix: impl IntoNamespace) -> Self {
        let prefix = prefix.into_namespace(self.separator);
        if !self.starts_with(&prefix) {
            return self.clone();
        }
        Self {
            segments: self.segments[prefix.segments.len()..].to_vec(),
            separator: self.separator,
        }
    }

    /// Prepend `prefix`
    pub fn unshift(&self, prefix: impl IntoNamespace) -> Self {
        let mut segments = prefix.into_namespace(self.separator).segments;
        segments.extend(self.segments.iter().cloned());
        Self {
            segments,
            separator: self.separator,
        }
    }

    /// Append every operand's segments
    pub fn concat<I, N>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: IntoNamespace,
    {
        let mut segments = self.segments.clone();
        for other in others {
            segments.extend(other.into_namespace(self.separator).segments);
        }
        Self {
            segments,
            separator: self.separator,
        }
    }

    /// Append a single operand
    pub fn join(&self, other: impl IntoNamespace) -> Self {
        self.concat([other])
    }

    /// Compute the path from this namespace, seen as a directory, to `other`.
    ///
    /// `here` is emitted when `other` lives at or below this namespace and no
    /// `back` token was needed; passing `None` omits it.
    pub fn relative(&self, other: impl IntoNamespace, here: Option<&str>, back: &str) -> Self {
        let other = other.into_namespace(self.separator);

        if self.is_empty() {
            return other.convert(self.separator);
        }

        let this_len = self.segments.len();
        let other_len = other.segments.len();
        let common = self
            .segments
            .iter()
            .zip(&other.segments)
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments: Vec<String> = std::iter::repeat(back.to_string())
            .take(this_len - common)
            .collect();

        if this_len <= other_len && segments.is_empty() {
            if let Some(here) = here {
                segments.push(here.to_string());
            }
        }

        segments.extend(other.segments[common..].iter().cloned());

        Self {
            segments,
            separator: self.separator,
        }
    }

    /// Re-render with another separator, splitting segments that contain it
    pub fn convert(&self, separator: char) -> Self {
        Self::from_segments(&self.segments, separator)
    }

    /// Remove `count` trailing segments
    pub fn pop(&self, count: usize) -> Result<Self, CoreError> {
        if count > self.segments.len() {
            return Err(CoreError::NamespaceOutOfRange {
                namespace: self.to_string(),
                count,
            });
        }
        Ok(Self {
            segments: self.segments[..self.segments.len() - count].to_vec(),
            separator: self.separator,
        })
    }

    pub fn last_segment(&self) -> Result<&str, CoreError> {
        self.segments
            .last()
            .map(String::as_str)
            .ok_or(CoreError::EmptyNamespace)
    }
}

// Two namespaces render identically under a shared separator exactly when
// their segments match, so the separator takes no part in equality.
impl PartialEq for TypeNamespace {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Hash for TypeNamespace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl fmt::Display for TypeNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{}", self.separator)?;
            }
            write!(f, "{}", segment)?;
            first = false;
        }
        Ok(())
    }
}
