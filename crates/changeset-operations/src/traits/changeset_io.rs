use std::path::{Path, PathBuf};

use changeset_core::Changeset;
use changeset_project::SkillRepository;

use crate::Result;

pub trait ChangesetReader: Send + Sync {
    /// Pending changeset files in processing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the changeset directory cannot be read.
    fn list_changesets(&self, repo: &SkillRepository) -> Result<Vec<PathBuf>>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_content(&self, path: &Path) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid changeset.
    fn read_changeset(&self, path: &Path) -> Result<Changeset>;
}

pub trait ChangesetWriter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    fn remove_changeset(&self, path: &Path) -> Result<()>;
}
