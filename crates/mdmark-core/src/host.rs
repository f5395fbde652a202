//! Capability traits the note workflow needs from its host.
//!
//! The workflow never talks to a terminal, an editor, or the disk directly.
//! It receives these narrow interfaces instead, so a terminal front end, an
//! editor bridge, and test fakes can all drive the same code.

use std::io;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Session key holding the active note name.
pub const ACTIVE_NOTE_KEY: &str = "selectedMarkdownNote";

/// A single-line text prompt with a pre-filled default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt<'a> {
    pub message: &'a str,
    pub default: &'a str,
}

/// Asks the user for one line of text.
pub trait TextPrompt {
    /// Returns `None` when the user dismisses the prompt.
    fn ask(&mut self, prompt: Prompt<'_>) -> Option<String>;
}

/// Lets the user choose one item from a list.
pub trait Picker {
    /// Returns the index of the chosen item, or `None` on cancel.
    fn pick(&mut self, placeholder: &str, items: &[String]) -> Option<usize>;
}

/// Cursor position in the document the user is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Absolute path of the document.
    pub path: PathBuf,
    /// 1-based cursor line.
    pub line: NonZeroU32,
}

/// Reports where the user currently is.
pub trait ActiveDocument {
    fn location(&self) -> Option<SourceLocation>;
}

/// Displays messages to the user.
pub trait Notifier {
    fn info(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Everything the workflow asks of its host, bundled.
pub trait Host: TextPrompt + Picker + ActiveDocument + Notifier {}

impl<T: TextPrompt + Picker + ActiveDocument + Notifier> Host for T {}

/// The file operations the workflow performs.
pub trait FileStore {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and every missing parent.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()>;

    /// Names of the regular files directly inside `dir`, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Write `contents` to a file that must not exist yet.
    ///
    /// # Errors
    ///
    /// Fails with [`io::ErrorKind::AlreadyExists`] instead of overwriting.
    fn create_new(&mut self, path: &Path, contents: &str) -> io::Result<()>;

    /// Append `contents` to an existing file.
    ///
    /// # Errors
    ///
    /// Fails with [`io::ErrorKind::NotFound`] if the file is missing.
    fn append(&mut self, path: &Path, contents: &str) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// String key-value store scoped to one editing session.
pub trait SessionState {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`crate::MdmarkError::Session`] if the value cannot be stored.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
