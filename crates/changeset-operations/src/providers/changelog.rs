use std::path::Path;

use changeset_changelog::Changelog;
use chrono::NaiveDate;
use semver::Version;

use crate::Result;
use crate::error::OperationError;
use crate::traits::ChangelogWriter;

pub struct FileSystemChangelogWriter;

impl FileSystemChangelogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemChangelogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogWriter for FileSystemChangelogWriter {
    fn upsert_skill_release(
        &self,
        path: &Path,
        version: &Version,
        date: NaiveDate,
        notes: &str,
    ) -> Result<bool> {
        let mut changelog = Changelog::from_file_or(path, Changelog::new)?;

        if !changelog.upsert_skill_release(version, date, notes) {
            tracing::debug!(path = %path.display(), %version, "skill changelog already has release");
            return Ok(false);
        }

        changelog.write_to_file(path)?;
        Ok(true)
    }

    fn insert_root_release(&self, path: &Path, version: &Version, notes: &str) -> Result<bool> {
        let mut changelog = Changelog::from_file_or(path, Changelog::new_root)?;

        if !changelog.insert_root_release(version, notes) {
            tracing::debug!(path = %path.display(), %version, "root changelog already has release");
            return Ok(false);
        }

        changelog.write_to_file(path)?;
        Ok(true)
    }

    fn read_changelog(&self, path: &Path) -> Result<String> {
        Ok(Changelog::from_file(path)?.into_content())
    }

    fn write_release_notes(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).map_err(|source| OperationError::ReleaseNotesWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
