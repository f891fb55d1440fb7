//! The shared on-disk ledger of known environment prefixes.
//!
//! The ledger is a plain UTF-8 text file with one absolute prefix path per
//! line, shared by every concurrent invocation of the tool for one user.
//! It carries no lock: a single-line append is the only write that is safe
//! against concurrent writers, so a duplicate entry can slip in when two
//! processes race through the presence check, and whole-file rewrites can
//! lose an append that races with them. Both outcomes are tolerated and
//! collapsed by later maintenance passes instead of being prevented with
//! locking.

use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use thiserror::Error;

use crate::path::{normalize_path, normalized_key};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to create the environments registry at '{path}'")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to append to the environments registry at '{path}'")]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to rewrite the environments registry at '{path}'")]
    Rewrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Handle to an `environments.txt` ledger file.
#[derive(Debug, Clone)]
pub struct EnvironmentsTxt {
    path: PathBuf,
}

impl EnvironmentsTxt {
    /// Constructs a handle to the ledger at the given path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Constructs a handle to the current user's ledger.
    ///
    /// By default this lives under the keel home directory, which honors
    /// the `KEEL_HOME` environment variable.
    pub fn from_env() -> Self {
        let path = keel_config::environments_txt_path()
            .or_else(|| {
                std::env::current_dir()
                    .ok()
                    .map(|cwd| cwd.join(keel_consts::ENVIRONMENTS_TXT_FILE))
            })
            .unwrap_or_else(|| PathBuf::from(keel_consts::ENVIRONMENTS_TXT_FILE));
        Self::new(path)
    }

    /// Returns the location of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the ledger file and its parent directory if absent.
    ///
    /// Safe to call from multiple processes at once: losing the creation
    /// race is indistinguishable from the file already existing. The file
    /// gets relaxed permissions so other accounts on a shared machine can
    /// register their environments in it too.
    pub fn ensure_exists(&self) -> Result<(), RegistryError> {
        keel_utils::fs::touch_shared(&self.path).map_err(|source| RegistryError::Create {
            path: self.path.clone(),
            source,
        })
    }

    /// Iterates over the non-empty, whitespace-trimmed lines of the ledger
    /// in file order. A missing ledger yields no lines. Call again for a
    /// fresh pass over the file.
    pub fn lines(&self) -> impl Iterator<Item = String> {
        fs_err::File::open(&self.path)
            .ok()
            .into_iter()
            .flat_map(|file| {
                BufReader::new(file)
                    .lines()
                    .map_while(Result::ok)
                    .map(|line| line.trim().to_owned())
                    .filter(|line| !line.is_empty())
            })
    }

    /// Appends `prefix` to the ledger unless an equal path is already
    /// recorded.
    ///
    /// The whole `path\n` line is written with one append-mode write, so
    /// it cannot interleave with or truncate a concurrent append. The
    /// presence check and the append are not atomic together: two racing
    /// processes can both miss the duplicate and both append. Readers must
    /// collapse duplicates; [`EnvironmentsTxt::rewrite_deduplicated`]
    /// eventually removes them from disk.
    pub fn append_deduplicated(&self, prefix: &Path) -> Result<(), RegistryError> {
        let key = normalized_key(prefix);
        if self.lines().any(|line| normalized_key(Path::new(&line)) == key) {
            return Ok(());
        }

        let mut line = normalize_path(prefix).to_string_lossy().into_owned();
        line.push('\n');
        let append = |source: io::Error| RegistryError::Append {
            path: self.path.clone(),
            source,
        };
        fs_err::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(append)?
            .write_all(line.as_bytes())
            .map_err(append)
    }

    /// Drops every entry equal to `prefix` and rewrites the ledger with
    /// the remainder. Removing an entry that is not recorded is a no-op.
    pub fn remove_all(&self, prefix: &Path) -> Result<(), RegistryError> {
        if !self.path.is_file() {
            return Ok(());
        }
        let key = normalized_key(prefix);
        let remaining = self
            .lines()
            .filter(|line| normalized_key(Path::new(line.as_str())) != key)
            .collect();
        self.replace_with(remaining)
    }

    /// Maintenance pass collapsing duplicate entries, keeping the first
    /// occurrence of each path in file order.
    pub fn rewrite_deduplicated(&self) -> Result<(), RegistryError> {
        if !self.path.is_file() {
            return Ok(());
        }
        let deduplicated = self
            .lines()
            .unique_by(|line| normalized_key(Path::new(line.as_str())))
            .collect();
        self.replace_with(deduplicated)
    }

    /// Replaces the ledger contents through a temporary file and a rename,
    /// so readers never observe a half-written ledger. An append racing
    /// with the read above can be lost; see the module docs.
    fn replace_with(&self, lines: Vec<String>) -> Result<(), RegistryError> {
        let rewrite = |source: io::Error| RegistryError::Rewrite {
            path: self.path.clone(),
            source,
        };
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(rewrite)?;
        for line in &lines {
            writeln!(staged, "{line}").map_err(rewrite)?;
        }
        staged.persist(&self.path).map_err(|err| rewrite(err.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_in(dir: &Path) -> EnvironmentsTxt {
        EnvironmentsTxt::new(dir.join(keel_consts::ENVIRONMENTS_TXT_FILE))
    }

    #[test]
    fn missing_ledger_yields_no_lines() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        assert_eq!(ledger.lines().count(), 0);
    }

    #[test]
    fn ensure_exists_survives_repeated_calls() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir.path().join("deep/nested"));

        ledger.ensure_exists().unwrap();
        assert!(ledger.path().is_file());
        ledger.ensure_exists().unwrap();
        assert_eq!(ledger.lines().count(), 0);
    }

    #[test]
    fn append_is_idempotent_per_path() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        let prefix = dir.path().join("gascon");

        ledger.append_deduplicated(&prefix).unwrap();
        ledger.append_deduplicated(&prefix).unwrap();

        let lines: Vec<_> = ledger.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(crate::paths_equal(Path::new(&lines[0]), &prefix));
    }

    #[test]
    fn append_dedups_against_trailing_separator_variants() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        let prefix = dir.path().join("gascon");
        let mut with_separator = prefix.clone().into_os_string();
        with_separator.push(std::path::MAIN_SEPARATOR.to_string());

        ledger.append_deduplicated(&prefix).unwrap();
        ledger
            .append_deduplicated(Path::new(&with_separator))
            .unwrap();

        assert_eq!(ledger.lines().count(), 1);
    }

    #[test]
    fn lines_skip_blank_and_padded_entries() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        fs_err::write(ledger.path(), "  /tmp/a  \n\n/tmp/b\n   \n").unwrap();

        let lines: Vec<_> = ledger.lines().collect();
        assert_eq!(lines, vec!["/tmp/a".to_owned(), "/tmp/b".to_owned()]);
    }

    #[test]
    fn remove_all_drops_every_equal_entry() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        fs_err::write(ledger.path(), "/tmp/a\n/tmp/b\n/tmp/a/\n").unwrap();

        ledger.remove_all(Path::new("/tmp/a")).unwrap();

        let lines: Vec<_> = ledger.lines().collect();
        assert_eq!(lines, vec!["/tmp/b".to_owned()]);
    }

    #[test]
    fn remove_all_on_missing_ledger_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        ledger.remove_all(Path::new("/tmp/a")).unwrap();
        assert!(!ledger.path().exists());
    }

    #[test]
    fn rewrite_keeps_first_occurrence_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        fs_err::write(ledger.path(), "/tmp/b\n/tmp/a\n/tmp/b/\n/tmp/a\n").unwrap();

        ledger.rewrite_deduplicated().unwrap();

        let lines: Vec<_> = ledger.lines().collect();
        assert_eq!(lines, vec!["/tmp/b".to_owned(), "/tmp/a".to_owned()]);
    }
}
