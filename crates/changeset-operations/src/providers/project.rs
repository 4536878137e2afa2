use std::path::Path;

use changeset_core::SkillInfo;
use changeset_project::{SkillRepository, discover_skills};

use crate::Result;
use crate::traits::ProjectProvider;

pub struct FileSystemProjectProvider;

impl FileSystemProjectProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemProjectProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectProvider for FileSystemProjectProvider {
    fn open_repository(&self, root: &Path) -> Result<SkillRepository> {
        Ok(SkillRepository::open(root)?)
    }

    fn discover_skills(&self, repo: &SkillRepository) -> Result<Vec<SkillInfo>> {
        Ok(discover_skills(repo)?)
    }
}
