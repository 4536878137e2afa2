use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use changeset_core::SkillInfo;
use walkdir::WalkDir;

use crate::config::{RepositoryConfig, load_repository_config};
use crate::error::ProjectError;

const CHANGESET_EXTENSION: &str = "md";
const CHANGESET_README: &str = "README.md";

/// A checked-out skills repository: its root and layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRepository {
    pub root: PathBuf,
    pub config: RepositoryConfig,
}

impl SkillRepository {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: RepositoryConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Opens the repository at `root`, reading `.changeset/config.toml` when present.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError` if the config file exists but cannot be read or parsed.
    pub fn open(root: &Path) -> Result<Self, ProjectError> {
        let config = load_repository_config(root)?;
        Ok(Self::new(root, config))
    }

    #[must_use]
    pub fn changeset_dir(&self) -> PathBuf {
        self.root.join(self.config.changeset_dir())
    }

    #[must_use]
    pub fn skills_dir(&self) -> PathBuf {
        self.root.join(self.config.skills_dir())
    }

    #[must_use]
    pub fn release_manifest_path(&self) -> PathBuf {
        self.root.join(self.config.release_manifest())
    }

    #[must_use]
    pub fn root_changelog_path(&self) -> PathBuf {
        self.root.join(self.config.root_changelog())
    }

    #[must_use]
    pub fn package_manifest_path(&self) -> PathBuf {
        self.root.join(self.config.package_manifest())
    }

    #[must_use]
    pub fn release_notes_path(&self) -> PathBuf {
        self.root.join(self.config.release_notes())
    }

    /// Repo-relative form of `path` with `/` separators, as git reports paths.
    #[must_use]
    pub fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        to_slash(relative)
    }

    fn is_release_manifest(&self, path: &Path) -> bool {
        let manifest = self.release_manifest_path();
        if manifest.parent() != path.parent() {
            return false;
        }

        match (manifest.file_name(), path.file_name()) {
            (Some(expected), Some(actual)) => expected
                .to_string_lossy()
                .eq_ignore_ascii_case(&actual.to_string_lossy()),
            _ => false,
        }
    }
}

pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Lists pending changeset documents, sorted by file name.
///
/// Only `*.md` files directly inside the changeset directory count; the
/// directory's README and the release manifest are skipped regardless of case.
/// A missing directory yields an empty list.
///
/// # Errors
///
/// Returns `ProjectError::DirectoryRead` if the directory exists but cannot be listed.
pub fn list_changeset_files(repo: &SkillRepository) -> Result<Vec<PathBuf>, ProjectError> {
    let dir = repo.changeset_dir();

    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(ProjectError::DirectoryRead { path: dir, source }),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ProjectError::DirectoryRead {
            path: dir.clone(),
            source,
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(CHANGESET_EXTENSION) {
            continue;
        }

        let is_readme = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().eq_ignore_ascii_case(CHANGESET_README));
        if is_readme || repo.is_release_manifest(&path) {
            continue;
        }

        files.push(path);
    }

    files.sort();
    tracing::debug!(count = files.len(), dir = %dir.display(), "listed changeset files");
    Ok(files)
}

/// Finds every skill document below the skills directory.
///
/// A skill is named after the directory holding its document, so hidden
/// grouping folders such as `skills/.curated/<name>/` are transparent. The
/// result is sorted by name.
///
/// # Errors
///
/// Returns `ProjectError::SkillDiscovery` if the tree cannot be walked and
/// `ProjectError::DuplicateSkill` if two documents share a directory name.
pub fn discover_skills(repo: &SkillRepository) -> Result<Vec<SkillInfo>, ProjectError> {
    let skills_dir = repo.skills_dir();
    if !skills_dir.is_dir() {
        tracing::debug!(dir = %skills_dir.display(), "skills directory not found");
        return Ok(Vec::new());
    }

    let mut skills: BTreeMap<String, SkillInfo> = BTreeMap::new();

    for entry in WalkDir::new(&skills_dir).sort_by_file_name() {
        let entry = entry.map_err(|source| ProjectError::SkillDiscovery {
            path: skills_dir.clone(),
            source,
        })?;

        if !entry.file_type().is_file() || entry.file_name() != repo.config.skill_file() {
            continue;
        }

        let path = entry.into_path();
        let Some(dir) = path.parent().filter(|dir| *dir != skills_dir) else {
            continue;
        };
        let Some(name) = dir.file_name().map(|name| name.to_string_lossy().into_owned()) else {
            continue;
        };

        if let Some(existing) = skills.get(&name) {
            return Err(ProjectError::DuplicateSkill {
                name,
                first: existing.path.clone(),
                second: path,
            });
        }

        skills.insert(name.clone(), SkillInfo::new(name, path));
    }

    tracing::debug!(count = skills.len(), "discovered skills");
    Ok(skills.into_values().collect())
}
