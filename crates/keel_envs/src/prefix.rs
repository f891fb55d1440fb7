//! Telling genuine environments apart from arbitrary directories.

use std::path::Path;

/// Returns true iff `path` is a directory with the environment marker file
/// directly inside it.
///
/// The marker is written by environment creation; this side never touches
/// it. A missing or unreadable path is simply not an environment, never an
/// error.
pub fn is_environment(path: &Path) -> bool {
    path.is_dir() && path.join(keel_consts::ENV_MARKER_FILE).is_file()
}
