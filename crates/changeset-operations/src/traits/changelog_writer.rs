use std::path::Path;

use chrono::NaiveDate;
use semver::Version;

use crate::Result;

pub trait ChangelogWriter: Send + Sync {
    /// Adds a dated `## {version} - {date}` section to a skill changelog,
    /// creating the file when missing. Returns `false` if the version was
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the changelog cannot be read or written.
    fn upsert_skill_release(
        &self,
        path: &Path,
        version: &Version,
        date: NaiveDate,
        notes: &str,
    ) -> Result<bool>;

    /// Adds a `## v{version}` section to the root changelog. Returns `false`
    /// if the version was already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the changelog cannot be read or written.
    fn insert_root_release(&self, path: &Path, version: &Version, notes: &str) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the changelog cannot be read.
    fn read_changelog(&self, path: &Path) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write_release_notes(&self, path: &Path, content: &str) -> Result<()>;
}
