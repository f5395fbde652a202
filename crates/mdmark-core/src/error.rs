//! Error types for mdmark.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level result type for mdmark operations.
pub type Result<T> = std::result::Result<T, MdmarkError>;

/// Top-level error type for mdmark.
///
/// A user declining a prompt is not represented here. Interactive
/// operations return `Ok(None)` for that case.
#[derive(Debug, Error)]
pub enum MdmarkError {
    #[error("No workspace folder found.")]
    NoWorkspace,

    #[error("No Markdown Bookmark Notes found. Create one first.")]
    NoNotesAvailable,

    #[error("No active editor.")]
    NoActiveDocument,

    #[error("No Markdown Note selected.")]
    NoActiveNote,

    #[error("no bookmark note named '{0}'")]
    UnknownNote(String),

    #[error("'{0}' cannot be used as a note name")]
    InvalidNoteName(String),

    #[error("failed to write {}: {source}", path.display())]
    StorageWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    StorageReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("gave up after {0} note names that already exist")]
    NameAttemptsExhausted(u32),

    #[error("config error: {0}")]
    Config(String),

    #[error("session error: {0}")]
    Session(String),
}

impl MdmarkError {
    /// Wrap an I/O error raised while mutating `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Wrap an I/O error raised while reading `path`.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageReadFailed {
            path: path.into(),
            source,
        }
    }
}
