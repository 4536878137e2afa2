use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ProjectError;
use crate::{CONFIG_FILE_NAME, DEFAULT_CHANGESET_DIR};

const DEFAULT_SKILLS_DIR: &str = "skills";
const DEFAULT_SKILL_FILE: &str = "SKILL.md";
const DEFAULT_RELEASE_MANIFEST: &str = ".changeset/release.md";
const DEFAULT_ROOT_CHANGELOG: &str = "CHANGELOG.md";
const DEFAULT_PACKAGE_MANIFEST: &str = "package.json";
const DEFAULT_RELEASE_NOTES: &str = ".release-notes.md";

/// Repository-relative locations of everything the release pipeline touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    changeset_dir: PathBuf,
    skills_dir: PathBuf,
    skill_file: String,
    release_manifest: PathBuf,
    root_changelog: PathBuf,
    package_manifest: PathBuf,
    release_notes: PathBuf,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            changeset_dir: PathBuf::from(DEFAULT_CHANGESET_DIR),
            skills_dir: PathBuf::from(DEFAULT_SKILLS_DIR),
            skill_file: DEFAULT_SKILL_FILE.to_string(),
            release_manifest: PathBuf::from(DEFAULT_RELEASE_MANIFEST),
            root_changelog: PathBuf::from(DEFAULT_ROOT_CHANGELOG),
            package_manifest: PathBuf::from(DEFAULT_PACKAGE_MANIFEST),
            release_notes: PathBuf::from(DEFAULT_RELEASE_NOTES),
        }
    }
}

impl RepositoryConfig {
    #[must_use]
    pub fn changeset_dir(&self) -> &Path {
        &self.changeset_dir
    }

    #[must_use]
    pub fn skills_dir(&self) -> &Path {
        &self.skills_dir
    }

    #[must_use]
    pub fn skill_file(&self) -> &str {
        &self.skill_file
    }

    #[must_use]
    pub fn release_manifest(&self) -> &Path {
        &self.release_manifest
    }

    #[must_use]
    pub fn root_changelog(&self) -> &Path {
        &self.root_changelog
    }

    #[must_use]
    pub fn package_manifest(&self) -> &Path {
        &self.package_manifest
    }

    #[must_use]
    pub fn release_notes(&self) -> &Path {
        &self.release_notes
    }

    #[must_use]
    pub fn with_skills_dir(mut self, skills_dir: impl Into<PathBuf>) -> Self {
        self.skills_dir = skills_dir.into();
        self
    }

    #[must_use]
    pub fn with_changeset_dir(mut self, changeset_dir: impl Into<PathBuf>) -> Self {
        self.changeset_dir = changeset_dir.into();
        self
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RepositoryConfigFile {
    changeset_dir: Option<PathBuf>,
    skills_dir: Option<PathBuf>,
    skill_file: Option<String>,
    release_manifest: Option<PathBuf>,
    root_changelog: Option<PathBuf>,
    package_manifest: Option<PathBuf>,
    release_notes: Option<PathBuf>,
}

impl RepositoryConfigFile {
    fn into_config(self) -> RepositoryConfig {
        let defaults = RepositoryConfig::default();
        RepositoryConfig {
            changeset_dir: self.changeset_dir.unwrap_or(defaults.changeset_dir),
            skills_dir: self.skills_dir.unwrap_or(defaults.skills_dir),
            skill_file: self.skill_file.unwrap_or(defaults.skill_file),
            release_manifest: self.release_manifest.unwrap_or(defaults.release_manifest),
            root_changelog: self.root_changelog.unwrap_or(defaults.root_changelog),
            package_manifest: self.package_manifest.unwrap_or(defaults.package_manifest),
            release_notes: self.release_notes.unwrap_or(defaults.release_notes),
        }
    }
}

/// Parses the TOML overrides, filling every omitted key with its default.
///
/// # Errors
///
/// Returns `ProjectError::ConfigParse` if the content is not valid TOML or
/// names an unknown key.
pub fn parse_repository_config(
    content: &str,
    path: &Path,
) -> Result<RepositoryConfig, ProjectError> {
    let file: RepositoryConfigFile =
        toml::from_str(content).map_err(|source| ProjectError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(file.into_config())
}

/// Loads `.changeset/config.toml` below `repo_root`, or the defaults when the
/// file does not exist.
///
/// # Errors
///
/// Returns `ProjectError::ConfigRead` if the file exists but cannot be read
/// and `ProjectError::ConfigParse` if it is invalid.
pub fn load_repository_config(repo_root: &Path) -> Result<RepositoryConfig, ProjectError> {
    let path = repo_root.join(DEFAULT_CHANGESET_DIR).join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no repository config, using defaults");
            return Ok(RepositoryConfig::default());
        }
        Err(source) => return Err(ProjectError::ConfigRead { path, source }),
    };

    parse_repository_config(&content, &path)
}
