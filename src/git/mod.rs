//! Git operations abstraction layer
//!
//! The changelog builder only needs a handful of read-only queries against
//! the working tree. They are expressed by the [Repository] trait so the
//! builder can run against a real repository or an in-memory double.
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: mock implementation for testing
//!
//! ```rust
//! # use git_changelog::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! for path in repo.staged_paths()? {
//!     let diff = repo.staged_diff(&path)?;
//!     println!("{}: {} bytes of diff", path, diff.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Read-only view of a working tree's pending changes
///
/// Listing methods fail hard; callers treat a failing diff method as
/// "diff unavailable" for that path only.
pub trait Repository {
    /// Paths with differences staged in the index, relative to the repository root
    fn staged_paths(&self) -> Result<Vec<String>>;

    /// Modified, deleted and untracked paths in the working tree, ignored paths excluded
    fn unstaged_paths(&self) -> Result<Vec<String>>;

    /// Unified diff between HEAD and the index for one path
    fn staged_diff(&self, path: &str) -> Result<String>;

    /// Unified diff between the index and the working tree for one path
    fn worktree_diff(&self, path: &str) -> Result<String>;

    /// Whether the path currently exists in the working tree
    fn path_exists(&self, path: &str) -> bool;

    /// Paths for the requested mode
    fn changed_paths(&self, staged: bool) -> Result<Vec<String>> {
        if staged {
            self.staged_paths()
        } else {
            self.unstaged_paths()
        }
    }

    /// Diff for the requested mode
    fn diff(&self, path: &str, staged: bool) -> Result<String> {
        if staged {
            self.staged_diff(path)
        } else {
            self.worktree_diff(path)
        }
    }
}
