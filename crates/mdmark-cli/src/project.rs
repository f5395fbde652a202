//! Project root discovery.

use std::path::{Path, PathBuf};

/// Directories whose presence marks a project root.
const ROOT_MARKERS: &[&str] = &[".vscode", ".git"];

/// Nearest ancestor of `start` (inclusive) that contains a root marker.
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| ROOT_MARKERS.iter().any(|marker| dir.join(marker).is_dir()))
        .map(Path::to_path_buf)
}

/// The explicit root if given, otherwise one discovered from `cwd`.
///
/// A relative explicit root is taken relative to `cwd`, and symlinks are
/// resolved when the directory exists so one project keeps one session.
pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    match explicit {
        Some(root) => {
            let root = cwd.join(root);
            Some(root.canonicalize().unwrap_or(root))
        }
        None => discover(cwd),
    }
}
