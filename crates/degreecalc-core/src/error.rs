//! Document error types.
//!
//! The numeric core never fails; these cover reading and decoding the
//! JSON document that carries modules and settings.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or saving a module document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no `modules` array.
    #[error("document has no modules array")]
    MissingModules,

    /// A settings field carries a value no scheme or policy understands.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl DocumentError {
    /// Returns `true` if the file itself was the problem, not its content.
    pub fn is_io(&self) -> bool {
        matches!(self, DocumentError::Io { .. })
    }
}
