use std::fs;
use std::path::{Path, PathBuf};

use changeset_core::Changeset;
use changeset_parse::parse_changeset;
use changeset_project::{SkillRepository, list_changeset_files};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangesetReader, ChangesetWriter};

/// Reads and removes changeset documents; relative paths resolve against the repository root.
pub struct FileSystemChangesetIO {
    repo_root: PathBuf,
}

impl FileSystemChangesetIO {
    #[must_use]
    pub fn new(repo_root: &Path) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.repo_root.join(path)
        }
    }
}

impl ChangesetReader for FileSystemChangesetIO {
    fn list_changesets(&self, repo: &SkillRepository) -> Result<Vec<PathBuf>> {
        Ok(list_changeset_files(repo)?)
    }

    fn read_content(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve(path);
        fs::read_to_string(&full_path).map_err(|source| OperationError::ChangesetFileRead {
            path: full_path,
            source,
        })
    }

    fn read_changeset(&self, path: &Path) -> Result<Changeset> {
        let content = self.read_content(path)?;
        parse_changeset(&content).map_err(|source| OperationError::ChangesetParse {
            path: self.resolve(path),
            source,
        })
    }
}

impl ChangesetWriter for FileSystemChangesetIO {
    fn remove_changeset(&self, path: &Path) -> Result<()> {
        let full_path = self.resolve(path);
        fs::remove_file(&full_path).map_err(|source| OperationError::ChangesetRemove {
            path: full_path,
            source,
        })
    }
}
