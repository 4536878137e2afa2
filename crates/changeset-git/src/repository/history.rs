use std::path::Path;

use crate::{CommitInfo, Result};

use super::Repository;

impl Repository {
    /// Finds the most recent non-merge commit reachable from HEAD that added
    /// `path`.
    ///
    /// Returns `Ok(None)` when HEAD is unborn or no commit added the file.
    ///
    /// # Errors
    ///
    /// Returns an error if walking history or diffing a commit fails.
    pub fn introducing_commit(&self, path: &Path) -> Result<Option<CommitInfo>> {
        let relative = self.to_relative_path(path);

        let mut revwalk = self.inner.revwalk()?;
        if revwalk.push_head().is_err() {
            return Ok(None);
        }
        revwalk.set_sorting(git2::Sort::TIME)?;

        let mut diff_opts = git2::DiffOptions::new();
        diff_opts.pathspec(relative.as_path());
        diff_opts.disable_pathspec_match(true);

        for oid in revwalk {
            let commit = self.inner.find_commit(oid?)?;
            if commit.parent_count() > 1 {
                continue;
            }

            let tree = commit.tree()?;
            let parent_tree = if commit.parent_count() == 0 {
                None
            } else {
                Some(commit.parent(0)?.tree()?)
            };

            let diff = self.inner.diff_tree_to_tree(
                parent_tree.as_ref(),
                Some(&tree),
                Some(&mut diff_opts),
            )?;

            if diff
                .deltas()
                .any(|delta| delta.status() == git2::Delta::Added)
            {
                return Ok(Some(CommitInfo::from_commit(&commit)));
            }
        }

        Ok(None)
    }
}
