use crate::error::{ChangelogError, Result};
use git2::{
    Diff, DiffFormat, DiffOptions, ErrorCode, Repository as Git2Repo, Status, StatusOptions, Tree,
};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree, if the repository has one
    fn workdir(&self) -> Option<PathBuf> {
        self.repo.workdir().map(Path::to_path_buf)
    }

    /// HEAD's tree, or `None` on an unborn branch
    fn head_tree(&self) -> std::result::Result<Option<Tree<'_>>, git2::Error> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_tree()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn staged_diff_with(
        &self,
        opts: &mut DiffOptions,
    ) -> std::result::Result<Diff<'_>, git2::Error> {
        let tree = self.head_tree()?;
        self.repo.diff_tree_to_index(tree.as_ref(), None, Some(opts))
    }
}

fn single_path_options(path: &str) -> DiffOptions {
    let mut opts = DiffOptions::new();
    opts.pathspec(path).disable_pathspec_match(true);
    opts
}

/// Render a diff the way `git diff` prints it
fn patch_text(diff: &Diff<'_>) -> Result<String> {
    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if matches!(line.origin(), '+' | '-' | ' ') {
            text.push(line.origin());
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(text)
}

impl super::Repository for Git2Repository {
    fn staged_paths(&self) -> Result<Vec<String>> {
        let diff = self
            .staged_diff_with(&mut DiffOptions::new())
            .map_err(|e| ChangelogError::vcs_list(format!("Cannot diff HEAD against index: {}", e)))?;

        let paths = diff
            .deltas()
            .filter_map(|delta| delta.new_file().path().or_else(|| delta.old_file().path()))
            .map(|path| path.to_string_lossy().into_owned())
            .collect();

        Ok(paths)
    }

    fn unstaged_paths(&self) -> Result<Vec<String>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| ChangelogError::vcs_list(format!("Cannot read status: {}", e)))?;

        let wanted = Status::WT_MODIFIED
            | Status::WT_DELETED
            | Status::WT_TYPECHANGE
            | Status::WT_RENAMED
            | Status::WT_NEW;

        let paths = statuses
            .iter()
            .filter(|entry| entry.status().intersects(wanted))
            .filter_map(|entry| entry.path().map(str::to_string))
            .collect();

        Ok(paths)
    }

    fn staged_diff(&self, path: &str) -> Result<String> {
        let diff = self.staged_diff_with(&mut single_path_options(path))?;
        patch_text(&diff)
    }

    fn worktree_diff(&self, path: &str) -> Result<String> {
        let diff = self
            .repo
            .diff_index_to_workdir(None, Some(&mut single_path_options(path)))?;
        patch_text(&diff)
    }

    fn path_exists(&self, path: &str) -> bool {
        self.workdir()
            .map(|root| root.join(path).exists())
            .unwrap_or(false)
    }
}
