//! Note file naming and the heading every new note starts with.
//!
//! A note named `release` lives in `<storage>/release.md` and starts with:
//! ```markdown
//! ## 📌 release Bookmarks
//!
//! ```

/// File suffix that marks a note inside the storage directory.
pub const NOTE_SUFFIX: &str = ".md";

/// File name for the note called `name`.
#[must_use]
pub fn note_file_name(name: &str) -> String {
    format!("{name}{NOTE_SUFFIX}")
}

/// Note name for a storage directory entry, if the entry is a note file.
///
/// Only the trailing suffix is stripped, so `a.md.md` maps to `a.md`.
/// An entry named exactly `.md` has no name and is skipped.
#[must_use]
pub fn note_name_from_file(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(NOTE_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// Whether `name` stays a plain file inside the storage directory.
///
/// Separators and the `.`/`..` entries would place the note elsewhere.
#[must_use]
pub fn is_valid_note_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Initial content of a freshly created note: heading plus a blank line.
#[must_use]
pub fn heading(name: &str) -> String {
    format!("## 📌 {name} Bookmarks\n\n")
}

/// Name offered after `attempt` collisions on `base`, e.g. `my_notes_2`.
#[must_use]
pub fn collision_suggestion(base: &str, attempt: u32) -> String {
    format!("{base}_{attempt}")
}
