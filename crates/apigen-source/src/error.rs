use std::path::PathBuf;

use apigen_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Given path '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("'{target}' has more than one competing {kind} attribute")]
    CompetingAttributes { target: String, kind: &'static str },

    #[error("Unsupported manifest format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl From<SourceError> for CoreError {
    fn from(err: SourceError) -> Self {
        CoreError::Source(err.to_string())
    }
}
