use std::path::PathBuf;

use changeset_project::ChangedContext;

/// Inputs shared by every pull request rule.
pub struct VerificationContext {
    pub repo_root: PathBuf,
    pub base: String,
    pub head: String,
    /// File name of the skill document inside each skill directory.
    pub skill_file: String,
    pub changed: ChangedContext,
}

impl VerificationContext {
    /// Repo-relative path of the skill document in `skill_dir`.
    #[must_use]
    pub fn skill_document(&self, skill_dir: &str) -> String {
        format!("{skill_dir}/{}", self.skill_file)
    }
}
