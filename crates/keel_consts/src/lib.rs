//! Reserved names shared between the keel crates.

/// File under the keel home listing every known environment prefix, one
/// absolute path per line.
pub const ENVIRONMENTS_TXT_FILE: &str = "environments.txt";

/// Marker file directly inside a prefix directory that qualifies it as a
/// genuine keel environment rather than an arbitrary folder.
pub const ENV_MARKER_FILE: &str = ".keel-env";

/// Environment variable overriding the keel home directory.
pub const KEEL_HOME: &str = "KEEL_HOME";

/// Environment variable listing the directories searched for environments
/// by name, separated by the platform path-list separator.
pub const KEEL_ENVS_DIRS: &str = "KEEL_ENVS_DIRS";

/// Directory under the keel home where named environments live by default.
pub const ENVS_DIR: &str = "envs";
