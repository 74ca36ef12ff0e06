//! Error types for scene loading and validation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced while loading, parsing, or validating a scene.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// RON syntax or shape error.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// Parser message, including its line and column.
        message: String,
    },
    #[error("{message}")]
    /// The scene parsed but describes an inconsistent grid.
    Validation {
        /// Optional path associated with the validation error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly error message including the path when known.
    pub fn pretty(&self) -> String {
        let (kind, path, message) = match self {
            Self::Read { path, message } => ("Read error", path, message),
            Self::Parse { path, message } => ("Scene parse error", path, message),
            Self::Validation { path, message } => ("Scene validation error", path, message),
        };
        match path {
            Some(p) => format!("{} at {}: {}", kind, p.display(), message),
            None => format!("{}: {}", kind, message),
        }
    }

    /// Attach `path` to an error that does not carry one yet.
    #[must_use]
    pub fn with_path(self, p: PathBuf) -> Self {
        match self {
            Self::Read { path: None, message } => Self::Read {
                path: Some(p),
                message,
            },
            Self::Parse { path: None, message } => Self::Parse {
                path: Some(p),
                message,
            },
            Self::Validation { path: None, message } => Self::Validation {
                path: Some(p),
                message,
            },
            other => other,
        }
    }
}

impl From<launcher_grid::Error> for Error {
    fn from(err: launcher_grid::Error) -> Self {
        Self::Validation {
            path: None,
            message: err.to_string(),
        }
    }
}
