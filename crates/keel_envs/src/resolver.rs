//! Resolving which prefix an invocation means.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::environment_name::EnvironmentName;
use crate::path::normalize_path;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no environment name or prefix was given and no default prefix is configured")]
    NoDefaultPrefix,

    #[error("no directory is configured to search for the environment '{0}'")]
    NoEnvsDirs(EnvironmentName),
}

/// Picks the target prefix for an invocation from an explicit name or
/// path, an ordered list of search directories, and an optional default.
///
/// Resolution is purely lexical: the target does not have to exist, since
/// prefixes are resolved before the environment is created.
pub struct PathResolver {
    envs_dirs: Vec<PathBuf>,
    default_prefix: Option<PathBuf>,
}

impl PathResolver {
    /// Constructs a resolver with an explicit search list and default.
    pub fn new(envs_dirs: Vec<PathBuf>, default_prefix: Option<PathBuf>) -> Self {
        Self {
            envs_dirs,
            default_prefix,
        }
    }

    /// Constructs a resolver from the environment: search directories from
    /// `KEEL_ENVS_DIRS` (or `envs` under the keel home), with the keel
    /// home itself as the default "base" prefix.
    pub fn from_env() -> Self {
        Self::new(keel_config::envs_dirs(), keel_config::keel_home())
    }

    /// Resolves a `--name`/`--prefix`-style input, or the default prefix
    /// when no input was given.
    ///
    /// Anything that parses as a bare [`EnvironmentName`] is looked up in
    /// the search directories; everything else is treated as a filesystem
    /// path relative to the current working directory.
    pub fn resolve(&self, input: Option<&str>) -> Result<PathBuf, ResolveError> {
        match input {
            None => self
                .default_prefix
                .as_deref()
                .map(normalize_path)
                .ok_or(ResolveError::NoDefaultPrefix),
            Some(input) => match input.parse::<EnvironmentName>() {
                Ok(name) => self.resolve_name(&name),
                Err(_) => Ok(self.resolve_prefix(Path::new(input))),
            },
        }
    }

    /// Resolves an explicit path input. The path is anchored at the
    /// current working directory and does not have to exist.
    pub fn resolve_prefix(&self, prefix: &Path) -> PathBuf {
        normalize_path(prefix)
    }

    /// Resolves a bare name against the search directories in order.
    ///
    /// The first directory that already contains `name` wins; if `name`
    /// exists under several, earlier directories take precedence. When no
    /// directory contains it, the name resolves under the first search
    /// directory, which is where a new environment would be created.
    pub fn resolve_name(&self, name: &EnvironmentName) -> Result<PathBuf, ResolveError> {
        let existing = self
            .envs_dirs
            .iter()
            .map(|dir| dir.join(name.as_str()))
            .find(|candidate| candidate.is_dir());
        match existing {
            Some(path) => Ok(normalize_path(&path)),
            None => self
                .envs_dirs
                .first()
                .map(|dir| normalize_path(&dir.join(name.as_str())))
                .ok_or_else(|| ResolveError::NoEnvsDirs(name.clone())),
        }
    }
}
