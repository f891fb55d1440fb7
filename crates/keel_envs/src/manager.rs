//! Registering, unregistering, and listing known environment prefixes.

use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::path::{normalize_path, normalized_key};
use crate::prefix::is_environment;
use crate::registry::{EnvironmentsTxt, RegistryError};

/// Orchestrates the environments ledger.
///
/// Every operation is an idempotent set edit against the shared ledger;
/// there is no transaction state to carry between calls.
pub struct EnvsManager {
    registry: EnvironmentsTxt,
}

impl EnvsManager {
    /// Constructs a manager over the given ledger.
    pub fn new(registry: EnvironmentsTxt) -> Self {
        Self { registry }
    }

    /// Constructs a manager over the current user's ledger.
    pub fn from_env() -> Self {
        Self::new(EnvironmentsTxt::from_env())
    }

    /// Returns the underlying ledger handle.
    pub fn registry(&self) -> &EnvironmentsTxt {
        &self.registry
    }

    /// Records `prefix` in the ledger.
    ///
    /// Registering an already-registered prefix changes nothing. The
    /// prefix does not have to exist yet. Fails only when the ledger
    /// itself cannot be created or written.
    pub fn register_env(&self, prefix: &Path) -> Result<(), RegistryError> {
        let prefix = normalize_path(prefix);
        self.registry.ensure_exists()?;
        self.registry.append_deduplicated(&prefix)
    }

    /// Removes every ledger entry for `prefix`.
    ///
    /// Unregistering a prefix that was never registered is a no-op, never
    /// an error.
    pub fn unregister_env(&self, prefix: &Path) -> Result<(), RegistryError> {
        self.registry.remove_all(&normalize_path(prefix))
    }

    /// Returns the known environment prefixes in ledger order.
    ///
    /// Entries whose directory no longer qualifies as an environment are
    /// silently skipped, and duplicates are dropped. Spotting a duplicate
    /// also triggers an opportunistic dedup rewrite of the ledger; if that
    /// rewrite fails, the failure is logged and this still returns the
    /// deduplicated view. A missing or unreadable ledger lists nothing.
    pub fn list_all_known_prefixes(&self) -> Vec<PathBuf> {
        let lines: Vec<String> = self.registry.lines().collect();
        let unique: Vec<String> = lines
            .iter()
            .cloned()
            .unique_by(|line| normalized_key(Path::new(line.as_str())))
            .collect();

        if unique.len() < lines.len() {
            tracing::debug!(
                "collapsing duplicate entries in '{}'",
                self.registry.path().display()
            );
            if let Err(err) = self.registry.rewrite_deduplicated() {
                tracing::warn!(
                    "could not deduplicate '{}': {err}",
                    self.registry.path().display()
                );
            }
        }

        unique
            .into_iter()
            .filter(|line| is_environment(Path::new(line.as_str())))
            .map(PathBuf::from)
            .collect()
    }
}
