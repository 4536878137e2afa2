use std::path::Path;

use changeset_git::{CommitInfo, FileChange};

use crate::Result;

/// The history queries the release pipeline needs from version control.
///
/// Paths passed as `&str` are repo-relative with `/` separators.
pub trait GitProvider: Send + Sync {
    /// Files changed on `head` since it diverged from `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or either ref is unknown.
    fn changed_files(&self, repo_root: &Path, base: &str, head: &str)
    -> Result<Vec<FileChange>>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or history cannot be walked.
    fn introducing_commit(&self, repo_root: &Path, path: &Path) -> Result<Option<CommitInfo>>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or `refspec` is unknown.
    fn file_at_ref(&self, repo_root: &Path, refspec: &str, path: &str) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or `refspec` is unknown.
    fn path_exists_at_ref(&self, repo_root: &Path, refspec: &str, path: &str) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    fn remote_url(&self, repo_root: &Path) -> Result<Option<String>>;
}
