//! The note workflow: create, switch, and append bookmarks to notes.
//!
//! No file is touched until every input of an operation has been gathered,
//! so a dismissed prompt always leaves the disk and the session as they were.

use std::path::{Path, PathBuf};

use mdmark_core::note::{
    collision_suggestion, heading, is_valid_note_name, note_file_name, note_name_from_file,
};
use mdmark_core::{
    BookmarkEntry, Config, FileStore, Host, MdmarkError, Prompt, Result, SessionState,
    ACTIVE_NOTE_KEY,
};

/// Name collisions tolerated before `create_note` gives up.
pub const MAX_NAME_ATTEMPTS: u32 = 100;

const NEW_NOTE_PROMPT: &str = "Enter a name for the new Markdown Bookmark Note";
const NOTE_EXISTS_PROMPT: &str = "This note already exists. Enter a different name:";
const LINK_TEXT_PROMPT: &str = "Enter the bookmark name";
const SELECT_NOTE_PLACEHOLDER: &str = "Select a Markdown Bookmark Note";
const NO_NOTE_PLACEHOLDER: &str = "No Markdown Note selected.";
const SELECT_NOTE_CHOICE: &str = "Select a Markdown Note";
const CREATE_NOTE_CHOICE: &str = "Create a New Markdown Note";

/// Bookmark notes of one project, plus the session's active note.
pub struct NoteStore<F, S, H> {
    project_root: Option<PathBuf>,
    config: Config,
    files: F,
    session: S,
    host: H,
}

impl<F: FileStore, S: SessionState, H: Host> NoteStore<F, S, H> {
    /// `project_root` is `None` when no project is open; every operation
    /// then fails with [`MdmarkError::NoWorkspace`].
    pub fn new(
        project_root: Option<PathBuf>,
        config: Config,
        files: F,
        session: S,
        host: H,
    ) -> Self {
        Self {
            project_root,
            config,
            files,
            session,
            host,
        }
    }

    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    pub fn files(&self) -> &F {
        &self.files
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Storage directory path, without creating it.
    ///
    /// # Errors
    ///
    /// Returns [`MdmarkError::NoWorkspace`] if no project is open.
    pub fn storage_path(&self) -> Result<PathBuf> {
        self.project_root
            .as_ref()
            .map(|root| root.join(&self.config.storage_dir))
            .ok_or(MdmarkError::NoWorkspace)
    }

    /// Path of the note file for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MdmarkError::NoWorkspace`] if no project is open.
    pub fn note_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.storage_path()?.join(note_file_name(name)))
    }

    /// Storage directory, created with its parents if missing.
    ///
    /// # Errors
    ///
    /// Returns [`MdmarkError::NoWorkspace`] if no project is open, or
    /// [`MdmarkError::StorageWriteFailed`] if the directory cannot be created.
    pub fn resolve_storage_dir(&mut self) -> Result<PathBuf> {
        let dir = self.storage_path()?;
        if !self.files.exists(&dir) {
            self.files
                .create_dir_all(&dir)
                .map_err(|e| MdmarkError::write(&dir, e))?;
            tracing::info!(dir = %dir.display(), "created storage directory");
            let message = format!("Created folder: {}", dir.display());
            self.host.info(&message);
        }
        Ok(dir)
    }

    /// Names of all notes, sorted.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::resolve_storage_dir`] errors, or
    /// [`MdmarkError::StorageReadFailed`] if the directory cannot be listed.
    pub fn list_notes(&mut self) -> Result<Vec<String>> {
        let dir = self.resolve_storage_dir()?;
        let entries = self
            .files
            .list_files(&dir)
            .map_err(|e| MdmarkError::read(&dir, e))?;
        let mut names: Vec<String> = entries
            .iter()
            .filter_map(|file| note_name_from_file(file))
            .map(str::to_owned)
            .collect();
        names.sort();
        Ok(names)
    }

    /// The session's active note, if one was chosen.
    pub fn active_note(&self) -> Option<String> {
        self.session
            .get(ACTIVE_NOTE_KEY)
            .filter(|name| !name.is_empty())
    }

    /// Contents of the note `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MdmarkError::StorageReadFailed`] if the note cannot be read.
    pub fn read_note(&self, name: &str) -> Result<String> {
        let path = self.note_path(name)?;
        self.files
            .read_to_string(&path)
            .map_err(|e| MdmarkError::read(&path, e))
    }

    /// Create a note and make it active.
    ///
    /// `requested` answers the first name prompt; `None` asks the user.
    /// While the name is taken the user is asked again, with `<base>_2`,
    /// `<base>_3`, ... as suggestions. Returns `Ok(None)` if any answer is
    /// empty or dismissed.
    ///
    /// # Errors
    ///
    /// - [`MdmarkError::NoWorkspace`] if no project is open
    /// - [`MdmarkError::InvalidNoteName`] if a name would leave the storage directory
    /// - [`MdmarkError::NameAttemptsExhausted`] after [`MAX_NAME_ATTEMPTS`] collisions
    /// - [`MdmarkError::StorageWriteFailed`] if the file cannot be written
    /// - session errors if the note was written but could not be made active
    pub fn create_note(&mut self, requested: Option<&str>) -> Result<Option<String>> {
        let dir = self.storage_path()?;

        let answer = match requested {
            Some(name) => Some(name.to_string()),
            None => {
                let default = self.config.default_note_name.clone();
                self.host.ask(Prompt {
                    message: NEW_NOTE_PROMPT,
                    default: &default,
                })
            }
        };
        let Some(mut name) = answer.filter(|n| !n.is_empty()) else {
            return Ok(None);
        };
        ensure_valid_name(&name)?;

        let base = name.clone();
        let mut collisions = 0;
        while self.files.exists(&dir.join(note_file_name(&name))) {
            collisions += 1;
            if collisions >= MAX_NAME_ATTEMPTS {
                tracing::warn!(base = %base, collisions, "giving up on note name");
                return Err(MdmarkError::NameAttemptsExhausted(collisions));
            }
            tracing::debug!(name = %name, "note name taken");
            let suggestion = collision_suggestion(&base, collisions + 1);
            let answer = self.host.ask(Prompt {
                message: NOTE_EXISTS_PROMPT,
                default: &suggestion,
            });
            let Some(next) = answer.filter(|n| !n.is_empty()) else {
                return Ok(None);
            };
            ensure_valid_name(&next)?;
            name = next;
        }

        self.resolve_storage_dir()?;
        let path = dir.join(note_file_name(&name));
        self.files
            .create_new(&path, &heading(&name))
            .map_err(|e| MdmarkError::write(&path, e))?;
        tracing::info!(note = %name, path = %path.display(), "created note");

        // The file is kept even if the session cannot record it.
        let message = format!("Markdown note '{name}' created.");
        self.host.info(&message);
        self.set_active(&name)?;
        Ok(Some(name))
    }

    /// Make an existing note active.
    ///
    /// `choice` names the note directly; `None` lets the user pick one.
    /// Returns `Ok(None)` if the picker is dismissed.
    ///
    /// # Errors
    ///
    /// - [`MdmarkError::NoNotesAvailable`] if there are no notes
    /// - [`MdmarkError::UnknownNote`] if `choice` is not an existing note
    /// - listing errors from [`Self::list_notes`]
    pub fn switch_note(&mut self, choice: Option<&str>) -> Result<Option<String>> {
        let notes = self.list_notes()?;
        if notes.is_empty() {
            return Err(MdmarkError::NoNotesAvailable);
        }

        let selected = match choice {
            Some(name) => {
                if !notes.iter().any(|n| n == name) {
                    return Err(MdmarkError::UnknownNote(name.to_string()));
                }
                name.to_string()
            }
            None => {
                let picked = self
                    .host
                    .pick(SELECT_NOTE_PLACEHOLDER, &notes)
                    .and_then(|i| notes.get(i).cloned());
                let Some(name) = picked else {
                    return Ok(None);
                };
                name
            }
        };

        self.set_active(&selected)?;
        let message = format!("Switched to '{selected}' Bookmark Note.");
        self.host.info(&message);
        Ok(Some(selected))
    }

    /// Append a bookmark for the user's current line to the active note.
    ///
    /// With no active note the user first chooses between picking an
    /// existing note and creating one. `text` answers the link text prompt;
    /// `None` asks the user. Returns `Ok(None)` if the user backs out.
    ///
    /// # Errors
    ///
    /// - [`MdmarkError::NoWorkspace`] if no project is open
    /// - [`MdmarkError::NoActiveDocument`] if the host has no current location
    /// - [`MdmarkError::StorageWriteFailed`] if the note is missing or unwritable
    /// - errors from [`Self::switch_note`] or [`Self::create_note`]
    pub fn append_bookmark(&mut self, text: Option<&str>) -> Result<Option<BookmarkEntry>> {
        self.storage_path()?;

        let note = match self.active_note() {
            Some(note) => note,
            None => match self.choose_active_note()? {
                Some(note) => note,
                None => return Ok(None),
            },
        };

        let location = self.host.location().ok_or(MdmarkError::NoActiveDocument)?;

        let answer = match text {
            Some(text) => Some(text.to_string()),
            None => {
                let default = self.config.default_link_text.clone();
                self.host.ask(Prompt {
                    message: LINK_TEXT_PROMPT,
                    default: &default,
                })
            }
        };
        let Some(text) = answer.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let entry = BookmarkEntry::new(text, location.path, location.line);
        self.write_bookmark(&note, &entry)?;
        Ok(Some(entry))
    }

    /// Append `entry` to the note `note` as one markdown line.
    ///
    /// # Errors
    ///
    /// Returns [`MdmarkError::StorageWriteFailed`] if the note does not exist
    /// or cannot be appended to.
    pub fn write_bookmark(&mut self, note: &str, entry: &BookmarkEntry) -> Result<()> {
        let path = self.resolve_storage_dir()?.join(note_file_name(note));
        self.files
            .append(&path, &entry.to_markdown())
            .map_err(|e| MdmarkError::write(&path, e))?;
        tracing::info!(note, link = %entry.target(), "bookmark appended");
        let message = format!("Bookmark saved to '{note}'");
        self.host.info(&message);
        Ok(())
    }

    /// Show `err` to the user.
    pub fn report(&mut self, err: &MdmarkError) {
        tracing::debug!(error = ?err, "operation failed");
        self.host.error(&err.to_string());
    }

    fn choose_active_note(&mut self) -> Result<Option<String>> {
        let choices = [SELECT_NOTE_CHOICE.to_string(), CREATE_NOTE_CHOICE.to_string()];
        match self.host.pick(NO_NOTE_PLACEHOLDER, &choices) {
            Some(0) => self.switch_note(None),
            Some(1) => self.create_note(None),
            _ => Ok(None),
        }
    }

    fn set_active(&mut self, name: &str) -> Result<()> {
        self.session.set(ACTIVE_NOTE_KEY, name)?;
        tracing::debug!(note = name, "active note set");
        Ok(())
    }
}

fn ensure_valid_name(name: &str) -> Result<()> {
    if is_valid_note_name(name) {
        Ok(())
    } else {
        Err(MdmarkError::InvalidNoteName(name.to_string()))
    }
}
