use std::path::{Path, PathBuf};

use changeset_changelog::latest_release_body;
use changeset_manifest::ReleaseManifest;
use semver::Version;

use crate::Result;
use crate::traits::{ChangelogWriter, ManifestWriter, ProjectProvider};

#[derive(Debug)]
pub struct FinalizeOutput {
    pub version: Version,
    pub release_notes_path: PathBuf,
    pub release_notes: String,
    /// The manifest left by the prepare step, if any; removed by finalize.
    pub manifest: Option<ReleaseManifest>,
}

/// Turns a merged release into its GitHub release notes.
pub struct FinalizeOperation<P, M, C> {
    project_provider: P,
    manifest_writer: M,
    changelog_writer: C,
}

impl<P, M, C> FinalizeOperation<P, M, C>
where
    P: ProjectProvider,
    M: ManifestWriter,
    C: ChangelogWriter,
{
    pub fn new(project_provider: P, manifest_writer: M, changelog_writer: C) -> Self {
        Self {
            project_provider,
            manifest_writer,
            changelog_writer,
        }
    }

    /// Copies the root changelog section for the package version into the
    /// release notes file, then removes the release manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the package version cannot be read, the changelog's
    /// newest release is not that version or is empty, or a file cannot be
    /// written or removed.
    pub fn execute(&self, repo_root: &Path) -> Result<FinalizeOutput> {
        let repo = self.project_provider.open_repository(repo_root)?;

        let version = self
            .manifest_writer
            .read_package_version(&repo.package_manifest_path())?;
        let changelog = self
            .changelog_writer
            .read_changelog(&repo.root_changelog_path())?;
        let body = latest_release_body(&changelog, &version)?;

        let release_notes_path = repo.release_notes_path();
        let release_notes = format!("{body}\n");
        self.changelog_writer
            .write_release_notes(&release_notes_path, &release_notes)?;
        tracing::info!(%version, path = %release_notes_path.display(), "wrote release notes");

        let manifest_path = repo.release_manifest_path();
        let manifest = self.manifest_writer.read_release_manifest(&manifest_path)?;
        if manifest.is_some() {
            self.manifest_writer.remove_release_manifest(&manifest_path)?;
        } else {
            tracing::debug!(path = %manifest_path.display(), "no release manifest to remove");
        }

        Ok(FinalizeOutput {
            version,
            release_notes_path,
            release_notes,
            manifest,
        })
    }
}
