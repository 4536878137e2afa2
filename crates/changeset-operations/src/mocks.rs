use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use changeset_git::{CommitInfo, FileChange, FileStatus, GitError};

use crate::Result;
use crate::traits::GitProvider;

/// In-memory history: changed files, introducing commits and file contents per ref.
pub struct MockGitProvider {
    changed_files: Vec<FileChange>,
    introducing_commits: Vec<(PathBuf, CommitInfo)>,
    files: HashMap<(String, String), String>,
    remote_url: Option<String>,
    failing_history: bool,
    history_queries: Mutex<Vec<PathBuf>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            changed_files: Vec::new(),
            introducing_commits: Vec::new(),
            files: HashMap::new(),
            remote_url: None,
            failing_history: false,
            history_queries: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_changed_files(mut self, files: Vec<FileChange>) -> Self {
        self.changed_files = files;
        self
    }

    /// Marks each path as modified.
    #[must_use]
    pub fn with_modified(mut self, paths: &[&str]) -> Self {
        self.changed_files.extend(
            paths
                .iter()
                .map(|path| FileChange::new(PathBuf::from(path), FileStatus::Modified)),
        );
        self
    }

    #[must_use]
    pub fn with_introducing_commit(mut self, path: &str, commit: CommitInfo) -> Self {
        self.introducing_commits.push((PathBuf::from(path), commit));
        self
    }

    #[must_use]
    pub fn with_file(mut self, refspec: &str, path: &str, content: &str) -> Self {
        self.files.insert(
            (refspec.to_string(), path.to_string()),
            content.to_string(),
        );
        self
    }

    #[must_use]
    pub fn with_remote_url(mut self, url: &str) -> Self {
        self.remote_url = Some(url.to_string());
        self
    }

    /// Every history lookup fails as if the repository were missing.
    #[must_use]
    pub fn failing_history(mut self) -> Self {
        self.failing_history = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn history_queries(&self) -> Vec<PathBuf> {
        self.history_queries.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for MockGitProvider {
    fn changed_files(&self, _repo_root: &Path, _base: &str, _head: &str) -> Result<Vec<FileChange>> {
        Ok(self.changed_files.clone())
    }

    fn introducing_commit(&self, repo_root: &Path, path: &Path) -> Result<Option<CommitInfo>> {
        self.history_queries
            .lock()
            .expect("lock poisoned")
            .push(path.to_path_buf());

        if self.failing_history {
            return Err(GitError::NotARepository {
                path: repo_root.to_path_buf(),
            }
            .into());
        }

        Ok(self
            .introducing_commits
            .iter()
            .find(|(recorded, _)| path.ends_with(recorded))
            .map(|(_, commit)| commit.clone()))
    }

    fn file_at_ref(&self, _repo_root: &Path, refspec: &str, path: &str) -> Result<Option<String>> {
        Ok(self
            .files
            .get(&(refspec.to_string(), path.to_string()))
            .cloned())
    }

    fn path_exists_at_ref(&self, _repo_root: &Path, refspec: &str, path: &str) -> Result<bool> {
        Ok(self
            .files
            .contains_key(&(refspec.to_string(), path.to_string())))
    }

    fn remote_url(&self, _repo_root: &Path) -> Result<Option<String>> {
        Ok(self.remote_url.clone())
    }
}

/// A skill document with `metadata.version` set.
#[must_use]
pub fn skill_document(name: &str, version: &str) -> String {
    format!("---\nname: {name}\ndescription: Test skill\nmetadata:\n  version: \"{version}\"\n---\n\n# {name}\n")
}

/// A changeset document bumping each listed skill.
#[must_use]
pub fn changeset_document(skills: &[(&str, &str)], body: &str) -> String {
    let entries: String = skills
        .iter()
        .map(|(name, bump)| format!("\"{name}\": {bump}\n"))
        .collect();
    format!("---\n{entries}---\n\n{body}\n")
}
