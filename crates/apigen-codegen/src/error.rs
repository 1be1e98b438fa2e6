use std::path::PathBuf;

use apigen_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Directory does not exist: '{}'", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl CodegenError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| CodegenError::Io { path, source }
    }
}
