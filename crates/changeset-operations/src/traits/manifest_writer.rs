use std::path::Path;

use changeset_manifest::ReleaseManifest;
use semver::Version;

use crate::Result;

/// Version-bearing documents: skill metadata, `package.json` and the release manifest.
pub trait ManifestWriter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or carries no valid version.
    fn read_skill_version(&self, path: &Path) -> Result<Version>;

    /// # Errors
    ///
    /// Returns an error if the document cannot be read, updated or written.
    fn write_skill_version(&self, path: &Path, version: &Version) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or has no valid version.
    fn read_package_version(&self, path: &Path) -> Result<Version>;

    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read, updated or written.
    fn write_package_version(&self, path: &Path, version: &Version) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write_release_manifest(&self, path: &Path, content: &str) -> Result<()>;

    /// Reads the release manifest, `None` when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be read or parsed.
    fn read_release_manifest(&self, path: &Path) -> Result<Option<ReleaseManifest>>;

    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    fn remove_release_manifest(&self, path: &Path) -> Result<()>;
}
