use std::path::Path;

use changeset_git::{CommitInfo, FileChange, Repository};

use crate::Result;
use crate::traits::GitProvider;

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn changed_files(
        &self,
        repo_root: &Path,
        base: &str,
        head: &str,
    ) -> Result<Vec<FileChange>> {
        let repo = Repository::open(repo_root)?;
        Ok(repo.changed_files_since(base, head)?)
    }

    fn introducing_commit(&self, repo_root: &Path, path: &Path) -> Result<Option<CommitInfo>> {
        let repo = Repository::open(repo_root)?;
        Ok(repo.introducing_commit(path)?)
    }

    fn file_at_ref(&self, repo_root: &Path, refspec: &str, path: &str) -> Result<Option<String>> {
        let repo = Repository::open(repo_root)?;
        Ok(repo.file_at_ref(refspec, path)?)
    }

    fn path_exists_at_ref(&self, repo_root: &Path, refspec: &str, path: &str) -> Result<bool> {
        let repo = Repository::open(repo_root)?;
        Ok(repo.path_exists_at_ref(refspec, path)?)
    }

    fn remote_url(&self, repo_root: &Path) -> Result<Option<String>> {
        let repo = Repository::open(repo_root)?;
        Ok(repo.remote_url()?)
    }
}
