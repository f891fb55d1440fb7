//! Lexical path normalization backing every prefix comparison.
//!
//! Prefixes are routinely compared before they exist on disk, so
//! normalization never touches the filesystem and symlinks are not
//! resolved. The rule is: anchor relative paths at the current working
//! directory, drop `.` components and trailing separators, strip Windows
//! verbatim prefixes, and case-fold the comparison key on Windows where
//! the default filesystems are case-insensitive.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Returns an absolute, lexically simplified form of `path`.
///
/// `..` components are kept verbatim: collapsing them without consulting
/// the filesystem would change meaning under symlinks.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    dunce::simplified(&absolute)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// The string key under which a path participates in equality and dedup.
pub(crate) fn normalized_key(path: &Path) -> String {
    let key = normalize_path(path).to_string_lossy().into_owned();
    if cfg!(windows) {
        key.to_lowercase()
    } else {
        key
    }
}

/// Whether two paths identify the same prefix under the registry's
/// equality rule.
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    normalized_key(a) == normalized_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/tmp/x1/gascon", "/tmp/x1/gascon/")]
    #[case("/tmp/x1/gascon", "/tmp/x1/./gascon")]
    #[case("/tmp/x1", "/tmp/x1//")]
    fn equal_after_normalization(#[case] a: &str, #[case] b: &str) {
        assert!(paths_equal(Path::new(a), Path::new(b)));
    }

    #[test]
    fn distinct_paths_stay_distinct() {
        assert!(!paths_equal(
            Path::new("/tmp/x1/gascon"),
            Path::new("/tmp/x1/breton")
        ));
    }

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let cwd = env::current_dir().unwrap();
        assert_eq!(normalize_path(Path::new("blarg")), cwd.join("blarg"));
        assert_eq!(normalize_path(Path::new("./blarg")), cwd.join("blarg"));
    }

    #[test]
    fn nonexistent_paths_normalize_fine() {
        let path = Path::new("/definitely/not/created/anywhere/");
        assert_eq!(
            normalize_path(path),
            PathBuf::from("/definitely/not/created/anywhere")
        );
    }

    #[cfg(windows)]
    #[test]
    fn windows_comparison_ignores_case() {
        assert!(paths_equal(
            Path::new(r"C:\Envs\Gascon"),
            Path::new(r"c:\envs\gascon")
        ));
    }
}
