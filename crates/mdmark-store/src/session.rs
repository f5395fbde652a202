//! Session state: where the active note name is kept between commands.
//!
//! [`MemorySession`] lives as long as the process. [`JsonFileSession`]
//! persists values per project in one JSON file so successive CLI
//! invocations share the same session:
//! ```json
//! {
//!   "projects": {
//!     "/home/me/app": {
//!       "selectedMarkdownNote": { "value": "todo", "updated_at": "2025-02-10T09:15:00Z" }
//!     }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mdmark_core::{MdmarkError, Result, SessionState};

/// In-process session. Dropped with the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionState for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    projects: BTreeMap<String, BTreeMap<String, StoredValue>>,
}

/// Session persisted as JSON, scoped to one project root.
#[derive(Debug)]
pub struct JsonFileSession {
    path: PathBuf,
    scope: String,
    data: SessionFile,
}

impl JsonFileSession {
    /// Open the session file at `path` for the project at `scope`.
    /// A missing file starts an empty session.
    ///
    /// # Errors
    ///
    /// Returns [`MdmarkError::StorageReadFailed`] if the file cannot be read
    /// and [`MdmarkError::Session`] if it is not valid session JSON.
    pub fn open(path: &Path, scope: &Path) -> Result<Self> {
        let data = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| MdmarkError::read(path, e))?;
            serde_json::from_str(&content)
                .map_err(|e| MdmarkError::Session(format!("{}: {e}", path.display())))?
        } else {
            SessionFile::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            scope: scope.display().to_string(),
            data,
        })
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| MdmarkError::Session(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| MdmarkError::write(parent, e))?;
        }
        // Write-then-rename: readers never see a partial file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| MdmarkError::write(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| MdmarkError::write(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}

impl SessionState for JsonFileSession {
    fn get(&self, key: &str) -> Option<String> {
        self.data
            .projects
            .get(&self.scope)
            .and_then(|values| values.get(key))
            .map(|stored| stored.value.clone())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.data
            .projects
            .entry(self.scope.clone())
            .or_default()
            .insert(
                key.to_string(),
                StoredValue {
                    value: value.to_string(),
                    updated_at: Utc::now(),
                },
            );
        self.save()
    }
}

/// Platform location of the CLI session file.
pub fn default_session_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            return Some(PathBuf::from(local).join("mdmark").join("session.json"));
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        if let Some(xdg) = std::env::var_os("XDG_STATE_HOME") {
            return Some(PathBuf::from(xdg).join("mdmark").join("session.json"));
        }
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("mdmark")
                    .join("session.json"),
            );
        }
    }

    None
}
