//! # mdmark-store
//!
//! File system operations, session state, and the note workflow.
//!
//! Notes are plain markdown files under `<project>/.vscode/md_bookmark/`.
//! The files are the only source of truth; the session holds nothing but
//! the name of the active note.

pub mod fs;
pub mod session;
pub mod store;

#[cfg(test)]
mod fakes;

pub use fs::LocalFileStore;
pub use session::{default_session_path, JsonFileSession, MemorySession};
pub use store::{NoteStore, MAX_NAME_ATTEMPTS};
