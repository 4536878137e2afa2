use std::path::Path;

use changeset_core::SkillInfo;
use changeset_project::SkillRepository;

use crate::Result;

pub trait ProjectProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the repository configuration cannot be loaded.
    fn open_repository(&self, root: &Path) -> Result<SkillRepository>;

    /// # Errors
    ///
    /// Returns an error if the skills directory cannot be walked.
    fn discover_skills(&self, repo: &SkillRepository) -> Result<Vec<SkillInfo>>;
}
