use thiserror::Error;

/// Unified error type for git-changelog operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Invalid version format: {0}. Expected format: X.Y.Z[-prerelease][+build]")]
    Format(String),

    #[error("Invalid increment type: {0}. Expected 'major', 'minor', 'patch', or 'pre[type]'")]
    Increment(String),

    #[error("Failed to list changed files: {0}")]
    VcsList(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a version format error carrying the offending string
    pub fn format(version: impl Into<String>) -> Self {
        ChangelogError::Format(version.into())
    }

    /// Create an increment error carrying the rejected directive
    pub fn increment(kind: impl Into<String>) -> Self {
        ChangelogError::Increment(kind.into())
    }

    /// Create a listing error with context
    pub fn vcs_list(msg: impl Into<String>) -> Self {
        ChangelogError::VcsList(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }
}
