use std::io::ErrorKind;
use std::path::Path;

use changeset_manifest::{ManifestError, ReleaseManifest};
use semver::Version;

use crate::Result;
use crate::error::OperationError;
use crate::traits::ManifestWriter;

pub struct FileSystemManifestWriter;

impl FileSystemManifestWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemManifestWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestWriter for FileSystemManifestWriter {
    fn read_skill_version(&self, path: &Path) -> Result<Version> {
        Ok(changeset_manifest::read_skill_version(path)?)
    }

    fn write_skill_version(&self, path: &Path, version: &Version) -> Result<()> {
        Ok(changeset_manifest::write_skill_version(path, version)?)
    }

    fn read_package_version(&self, path: &Path) -> Result<Version> {
        Ok(changeset_manifest::read_package_version(path)?)
    }

    fn write_package_version(&self, path: &Path, version: &Version) -> Result<()> {
        Ok(changeset_manifest::write_package_version(path, version)?)
    }

    fn write_release_manifest(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).map_err(|source| {
            OperationError::Manifest(ManifestError::Write {
                path: path.to_path_buf(),
                source,
            })
        })
    }

    fn read_release_manifest(&self, path: &Path) -> Result<Option<ReleaseManifest>> {
        Ok(changeset_manifest::read_release_manifest(path)?)
    }

    fn remove_release_manifest(&self, path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(OperationError::ReleaseManifestRemove {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
