//! Bookmark entry: one markdown list item linking text to a source line.

use std::fmt;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// A link from display text to a line in a source file.
///
/// Entries are never stored structurally. They exist only long enough to
/// be rendered with [`BookmarkEntry::to_markdown`] and appended to a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkEntry {
    /// Link text shown in the note.
    pub text: String,

    /// Absolute path of the bookmarked source file.
    pub path: PathBuf,

    /// 1-based line number.
    pub line: NonZeroU32,
}

impl BookmarkEntry {
    pub fn new(text: impl Into<String>, path: impl Into<PathBuf>, line: NonZeroU32) -> Self {
        Self {
            text: text.into(),
            path: path.into(),
            line,
        }
    }

    /// Link target: a `file://` URI of the path plus a `#L<line>` fragment.
    ///
    /// The path is written as-is, without percent-encoding.
    #[must_use]
    pub fn target(&self) -> String {
        format!("file://{}#L{}", self.path.display(), self.line)
    }

    /// The markdown line appended to a note, including the trailing newline.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for BookmarkEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- [{}]({})", self.text, self.target())
    }
}
