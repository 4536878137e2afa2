use std::path::PathBuf;

use crate::{FileChange, FileStatus, GitError, Result};

use super::Repository;

impl Repository {
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if either base or head cannot be resolved.
    pub fn changed_files(&self, base: Option<&str>, head: &str) -> Result<Vec<FileChange>> {
        let head_tree = self.resolve_tree(head)?;

        let base_tree = match base {
            Some(refspec) => Some(self.resolve_tree(refspec)?),
            None => None,
        };

        let mut diff = self
            .inner
            .diff_tree_to_tree(base_tree.as_ref(), Some(&head_tree), None)?;

        let mut find_opts = git2::DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut changes = Vec::new();

        for delta in diff.deltas() {
            let status = match delta.status() {
                git2::Delta::Added => FileStatus::Added,
                git2::Delta::Deleted => FileStatus::Deleted,
                git2::Delta::Modified => FileStatus::Modified,
                git2::Delta::Renamed => FileStatus::Renamed,
                git2::Delta::Copied => FileStatus::Copied,
                _ => continue,
            };

            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(PathBuf::from)
                .ok_or(GitError::MissingDeltaPath)?;

            let mut change = FileChange::new(path, status);

            if status == FileStatus::Renamed || status == FileStatus::Copied {
                if let Some(old_path) = delta.old_file().path() {
                    change = change.with_old_path(old_path.to_path_buf());
                }
            }

            changes.push(change);
        }

        Ok(changes)
    }

    /// Files changed on `head` since it diverged from `base`, the `base...head`
    /// form of a pull request diff.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if either ref cannot be resolved and
    /// [`GitError::NoMergeBase`] if the two histories share no commit.
    pub fn changed_files_since(&self, base: &str, head: &str) -> Result<Vec<FileChange>> {
        let base_id = self.resolve_commit(base)?.id();
        let head_id = self.resolve_commit(head)?.id();

        let merge_base = self
            .inner
            .merge_base(base_id, head_id)
            .map_err(|_| GitError::NoMergeBase {
                base: base.to_string(),
                head: head.to_string(),
            })?;

        self.changed_files(Some(&merge_base.to_string()), head)
    }
}
