//! Domain logic - pure rules independent of git and the filesystem

pub mod change;
pub mod version;

pub use change::{classify, ChangeKind, ChangeRecord};
pub use version::{next_version, IncrementKind, SemanticVersion, DEFAULT_VERSION};
