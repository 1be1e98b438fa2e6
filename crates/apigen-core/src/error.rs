use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Type '{0}' is already registered in this context")]
    DuplicateType(String),

    #[error("Output type identity '{actual}' does not match its input identity '{expected}'")]
    IdentityMismatch { expected: String, actual: String },

    #[error("Namespace mismatch for {}, file contains '{existing}', given '{requested}'", path.display())]
    NamespaceMismatch {
        path: PathBuf,
        existing: String,
        requested: String,
    },

    #[error("Cannot pop {count} segment(s) from namespace '{namespace}'")]
    NamespaceOutOfRange { namespace: String, count: usize },

    #[error("Namespace is empty")]
    EmptyNamespace,

    #[error("Source error: {0}")]
    Source(String),
}
