use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid filter configuration: {0}")]
    Configuration(String),

    #[error("Root path '{}' does not exist or is not a directory", .0.display())]
    PathNotFound(PathBuf),

    /// The file could not be opened, read, or decoded as UTF-8 text.
    #[error("Failed to scan '{}': {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Traversal(#[from] ignore::Error),
}

impl Error {
    /// Fatal errors stop the run before any traversal work is done.
    /// Scan and traversal errors are local to one entry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::PathNotFound(_))
    }

    /// Path the error is keyed to, when one is known.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::PathNotFound(path) | Error::Scan { path, .. } => Some(path.as_path()),
            Error::Traversal(err) => walk_error_path(err),
            Error::Configuration(_) => None,
        }
    }
}

fn walk_error_path(err: &ignore::Error) -> Option<&std::path::Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        _ => None,
    }
}

/// Strips the path and depth wrappers the walker adds around an error.
pub(crate) fn walk_error_cause(err: &ignore::Error) -> &ignore::Error {
    match err {
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => walk_error_cause(err),
        other => other,
    }
}

pub type Result<T> = std::result::Result<T, Error>;
