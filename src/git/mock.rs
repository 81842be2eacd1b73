use crate::error::{ChangelogError, Result};
use crate::git::Repository;
use std::collections::{HashMap, HashSet};

/// Mock repository for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockRepository {
    staged: Vec<String>,
    unstaged: Vec<String>,
    staged_diffs: HashMap<String, String>,
    worktree_diffs: HashMap<String, String>,
    existing: HashSet<String>,
    failing_diffs: HashSet<String>,
    listing_error: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a staged change with its `git diff --cached` output
    pub fn stage(&mut self, path: impl Into<String>, diff: impl Into<String>) {
        let path = path.into();
        self.staged_diffs.insert(path.clone(), diff.into());
        self.staged.push(path);
    }

    /// Record a working-tree change with its `git diff` output
    pub fn modify(&mut self, path: impl Into<String>, diff: impl Into<String>) {
        let path = path.into();
        self.worktree_diffs.insert(path.clone(), diff.into());
        self.unstaged.push(path);
    }

    /// Mark a path as present on disk
    pub fn add_file(&mut self, path: impl Into<String>) {
        self.existing.insert(path.into());
    }

    /// Make diff retrieval fail for a path
    pub fn fail_diff(&mut self, path: impl Into<String>) {
        self.failing_diffs.insert(path.into());
    }

    /// Make every listing call fail with the given message
    pub fn fail_listing(&mut self, message: impl Into<String>) {
        self.listing_error = Some(message.into());
    }

    fn listed(&self, paths: &[String]) -> Result<Vec<String>> {
        match &self.listing_error {
            Some(message) => Err(ChangelogError::vcs_list(message.clone())),
            None => Ok(paths.to_vec()),
        }
    }

    fn diff_for(&self, diffs: &HashMap<String, String>, path: &str) -> Result<String> {
        if self.failing_diffs.contains(path) {
            return Err(git2::Error::from_str(&format!("diff failed for {}", path)).into());
        }
        Ok(diffs.get(path).cloned().unwrap_or_default())
    }
}

impl Repository for MockRepository {
    fn staged_paths(&self) -> Result<Vec<String>> {
        self.listed(&self.staged)
    }

    fn unstaged_paths(&self) -> Result<Vec<String>> {
        self.listed(&self.unstaged)
    }

    fn staged_diff(&self, path: &str) -> Result<String> {
        self.diff_for(&self.staged_diffs, path)
    }

    fn worktree_diff(&self, path: &str) -> Result<String> {
        self.diff_for(&self.worktree_diffs, path)
    }

    fn path_exists(&self, path: &str) -> bool {
        self.existing.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_modes() {
        let mut repo = MockRepository::new();
        repo.stage("a.rs", "new file mode 100644");
        repo.modify("b.rs", "+++ b/b.rs");

        assert_eq!(repo.changed_paths(true).unwrap(), vec!["a.rs".to_string()]);
        assert_eq!(repo.changed_paths(false).unwrap(), vec!["b.rs".to_string()]);
        assert_eq!(repo.diff("a.rs", true).unwrap(), "new file mode 100644");
        assert_eq!(repo.diff("a.rs", false).unwrap(), "");
    }

    #[test]
    fn test_mock_repository_failures() {
        let mut repo = MockRepository::new();
        repo.stage("a.rs", "x");
        repo.fail_diff("a.rs");
        assert!(repo.staged_diff("a.rs").is_err());

        repo.fail_listing("not a git repository");
        let err = repo.staged_paths().unwrap_err();
        assert!(matches!(err, ChangelogError::VcsList(_)));
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.staged_paths().unwrap().is_empty());
        assert!(!repo.path_exists("anything"));
    }
}
