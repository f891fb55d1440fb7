//! Resolution of the user-scoped directories keel stores its state in.

use std::path::PathBuf;

/// Returns the keel home directory.
///
/// Honors the `KEEL_HOME` environment variable and falls back to `.keel`
/// under the user's home directory. Returns `None` only when neither can
/// be determined.
pub fn keel_home() -> Option<PathBuf> {
    std::env::var_os(keel_consts::KEEL_HOME)
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".keel")))
}

/// Returns the location of the user's `environments.txt` ledger.
pub fn environments_txt_path() -> Option<PathBuf> {
    keel_home().map(|home| home.join(keel_consts::ENVIRONMENTS_TXT_FILE))
}

/// Returns the ordered list of directories searched for environments by
/// name.
///
/// Taken from the `KEEL_ENVS_DIRS` environment variable when set (split on
/// the platform path-list separator, empty segments skipped), otherwise
/// the `envs` directory under the keel home. Earlier directories take
/// precedence during name resolution.
pub fn envs_dirs() -> Vec<PathBuf> {
    match std::env::var_os(keel_consts::KEEL_ENVS_DIRS) {
        Some(dirs) => std::env::split_paths(&dirs)
            .filter(|path| !path.as_os_str().is_empty())
            .collect(),
        None => keel_home()
            .map(|home| home.join(keel_consts::ENVS_DIR))
            .into_iter()
            .collect(),
    }
}
