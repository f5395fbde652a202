//! Layered TOML configuration.
//!
//! Settings come from the global config file, then a project-local
//! `.mdmark.toml`. Each layer overrides only the keys it sets:
//! ```toml
//! storage_dir = ".vscode/md_bookmark"
//! default_note_name = "my_notes"
//! default_link_text = "Bookmark"
//! session_file = "/home/me/.local/state/mdmark/session.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{MdmarkError, Result};

/// Name of the project-local config file.
pub const LOCAL_CONFIG_FILE: &str = ".mdmark.toml";

/// Storage directory relative to the project root.
pub const DEFAULT_STORAGE_DIR: &str = ".vscode/md_bookmark";

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Note folder, relative to the project root.
    pub storage_dir: PathBuf,
    /// Suggested name for a new note.
    pub default_note_name: String,
    /// Suggested link text for a new bookmark.
    pub default_link_text: String,
    /// Where the CLI keeps session state. `None` uses the platform default.
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            default_note_name: "my_notes".to_string(),
            default_link_text: "Bookmark".to_string(),
            session_file: None,
        }
    }
}

/// One config file; unset keys fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub storage_dir: Option<PathBuf>,
    pub default_note_name: Option<String>,
    pub default_link_text: Option<String>,
    pub session_file: Option<PathBuf>,
}

impl ConfigLayer {
    /// Parse a layer from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`MdmarkError::Config`] on malformed TOML or unknown keys.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MdmarkError::Config(e.to_string()))
    }

    /// Load a layer from `path`. A missing file is an empty layer.
    ///
    /// # Errors
    ///
    /// Returns [`MdmarkError::StorageReadFailed`] if the file exists but
    /// cannot be read, or [`MdmarkError::Config`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| MdmarkError::read(path, e))?;
        Self::parse(&content)
            .map_err(|e| MdmarkError::Config(format!("{}: {e}", path.display())))
    }
}

impl Config {
    /// Apply `layer` on top of `self`.
    #[must_use]
    pub fn overlay(self, layer: ConfigLayer) -> Self {
        Self {
            storage_dir: layer.storage_dir.unwrap_or(self.storage_dir),
            default_note_name: layer.default_note_name.unwrap_or(self.default_note_name),
            default_link_text: layer.default_link_text.unwrap_or(self.default_link_text),
            session_file: layer.session_file.or(self.session_file),
        }
    }

    /// Defaults, then the global file, then the project-local file.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`ConfigLayer::load`].
    pub fn load(global: Option<&Path>, project_root: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = global {
            config = config.overlay(ConfigLayer::load(path)?);
        }
        if let Some(root) = project_root {
            config = config.overlay(ConfigLayer::load(&root.join(LOCAL_CONFIG_FILE))?);
        }
        Ok(config)
    }
}

/// Platform location of the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata).join("mdmark").join("config.toml"));
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("mdmark").join("config.toml"));
        }
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                PathBuf::from(home)
                    .join(".config")
                    .join("mdmark")
                    .join("config.toml"),
            );
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_note_layout() {
        let config = Config::default();
        assert_eq!(config.storage_dir, PathBuf::from(".vscode/md_bookmark"));
        assert_eq!(config.default_note_name, "my_notes");
        assert_eq!(config.default_link_text, "Bookmark");
        assert!(config.session_file.is_none());
    }

    #[test]
    fn overlay_replaces_only_set_keys() {
        let layer = ConfigLayer::parse("default_link_text = \"See\"\n").unwrap();
        let config = Config::default().overlay(layer);
        assert_eq!(config.default_link_text, "See");
        assert_eq!(config.default_note_name, "my_notes");
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        let err = ConfigLayer::parse("colour = \"red\"\n").unwrap_err();
        assert!(matches!(err, MdmarkError::Config(_)));
    }

    #[test]
    fn load_missing_file_is_empty_layer() {
        let dir = tempfile::tempdir().unwrap();
        let layer = ConfigLayer::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(layer, ConfigLayer::default());
    }

    #[test]
    fn project_file_overrides_global_file() {
        let global_dir = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        let global = global_dir.path().join("config.toml");
        fs::write(
            &global,
            "default_note_name = \"global\"\ndefault_link_text = \"G\"\n",
        )
        .unwrap();
        fs::write(
            project.path().join(LOCAL_CONFIG_FILE),
            "default_note_name = \"local\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&global), Some(project.path())).unwrap();
        assert_eq!(config.default_note_name, "local");
        assert_eq!(config.default_link_text, "G");
    }

    #[test]
    fn malformed_file_names_path_in_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "storage_dir = [").unwrap();
        let err = ConfigLayer::load(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
