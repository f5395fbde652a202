//! # mdmark-core
//!
//! Core types for mdmark, a keeper of per-project markdown bookmark notes.
//!
//! This crate defines what the other mdmark crates share:
//! - [`BookmarkEntry`]: one link from display text to a source line
//! - Note naming and heading markup ([`note`])
//! - Host capabilities ([`TextPrompt`], [`Picker`], [`ActiveDocument`],
//!   [`Notifier`], [`FileStore`], [`SessionState`])
//! - Layered configuration ([`Config`])
//! - Error type ([`MdmarkError`])

pub mod bookmark;
pub mod config;
pub mod error;
pub mod host;
pub mod note;

pub use bookmark::BookmarkEntry;
pub use config::{Config, ConfigLayer};
pub use error::{MdmarkError, Result};
pub use host::{
    ActiveDocument, FileStore, Host, Notifier, Picker, Prompt, SessionState, SourceLocation,
    TextPrompt, ACTIVE_NOTE_KEY,
};
