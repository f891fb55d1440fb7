//! The registry of known environment prefixes.
//!
//! Every invocation of keel for one user shares a plain-text ledger of the
//! environment locations it knows about. This crate owns that ledger: how
//! prefixes are resolved from user input, validated against the marker
//! file, recorded, and listed back, while staying consistent under
//! concurrent invocations and manual edits.

pub mod environment_name;
pub mod manager;
pub mod path;
pub mod prefix;
pub mod registry;
pub mod resolver;

pub use environment_name::{EnvironmentName, ParseEnvironmentNameError};
pub use manager::EnvsManager;
pub use path::{normalize_path, paths_equal};
pub use prefix::is_environment;
pub use registry::{EnvironmentsTxt, RegistryError};
pub use resolver::{PathResolver, ResolveError};
