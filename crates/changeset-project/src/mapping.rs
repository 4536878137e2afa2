use std::collections::BTreeSet;
use std::path::Path;

use crate::config::RepositoryConfig;
use crate::project::to_slash;

const CHANGESET_EXTENSION: &str = ".md";
const CHANGESET_README: &str = "readme.md";

/// What a pull request touched, derived from its changed paths.
///
/// Skill directories are repo-relative (`skills/foo` or `skills/.group/foo`)
/// and skill ids are the directory names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedContext {
    pub skill_dirs: BTreeSet<String>,
    pub skill_ids: BTreeSet<String>,
    pub changeset_files: Vec<String>,
    pub release_manifest_touched: bool,
    pub package_manifest_touched: bool,
    pub root_changelog_touched: bool,
}

impl ChangedContext {
    #[must_use]
    pub fn has_skill_changes(&self) -> bool {
        !self.skill_dirs.is_empty()
    }

    /// A release PR is the one that carries the release manifest.
    #[must_use]
    pub fn is_release_pr(&self) -> bool {
        self.release_manifest_touched
    }
}

/// Classifies repo-relative changed paths (with `/` separators).
///
/// Files directly in the skills directory are not part of any skill. Inside a
/// hidden grouping folder (`skills/.group/<id>/...`) the id is the third segment.
#[must_use]
pub fn collect_changed_context<S: AsRef<str>>(
    paths: &[S],
    config: &RepositoryConfig,
) -> ChangedContext {
    let skills_dir = to_slash(config.skills_dir());
    let changeset_dir = to_slash(config.changeset_dir());
    let release_manifest = to_slash(config.release_manifest());
    let package_manifest = to_slash(config.package_manifest());
    let root_changelog = to_slash(config.root_changelog());

    let mut context = ChangedContext::default();

    for path in paths {
        let path = path.as_ref().trim();
        if path.is_empty() {
            continue;
        }

        if path == release_manifest {
            context.release_manifest_touched = true;
        }
        if path == package_manifest {
            context.package_manifest_touched = true;
        }
        if path == root_changelog {
            context.root_changelog_touched = true;
        }

        if is_changeset_path(path, &changeset_dir, &release_manifest) {
            context.changeset_files.push(path.to_string());
        }

        if let Some((dir, id)) = skill_of(path, &skills_dir) {
            context.skill_dirs.insert(dir);
            context.skill_ids.insert(id);
        }
    }

    context
}

fn is_changeset_path(path: &str, changeset_dir: &str, release_manifest: &str) -> bool {
    let Some(name) = path
        .strip_prefix(changeset_dir)
        .and_then(|rest| rest.strip_prefix('/'))
    else {
        return false;
    };

    !name.contains('/')
        && name.ends_with(CHANGESET_EXTENSION)
        && !name.eq_ignore_ascii_case(CHANGESET_README)
        && !path.eq_ignore_ascii_case(release_manifest)
}

fn skill_of(path: &str, skills_dir: &str) -> Option<(String, String)> {
    let rest = path.strip_prefix(skills_dir)?.strip_prefix('/')?;
    let segments: Vec<&str> = rest.split('/').collect();

    match segments.as_slice() {
        [group, id, _, ..] if group.starts_with('.') => {
            let dir = to_slash(&Path::new(skills_dir).join(group).join(id));
            Some((dir, (*id).to_string()))
        }
        [group, ..] if group.starts_with('.') => None,
        [id, _, ..] if !id.is_empty() => {
            let dir = to_slash(&Path::new(skills_dir).join(id));
            Some((dir, (*id).to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(paths: &[&str]) -> ChangedContext {
        collect_changed_context(paths, &RepositoryConfig::default())
    }

    #[test]
    fn classifies_skill_directories() {
        let context = collect(&[
            "skills/foo/SKILL.md",
            "skills/foo/references/guide.md",
            "skills/.curated/bar/SKILL.md",
            "skills/README.md",
            "skills/.curated/loose.md",
            "docs/index.md",
        ]);

        assert_eq!(
            context.skill_dirs.iter().collect::<Vec<_>>(),
            ["skills/.curated/bar", "skills/foo"]
        );
        assert_eq!(context.skill_ids.iter().collect::<Vec<_>>(), ["bar", "foo"]);
        assert!(context.has_skill_changes());
    }

    #[test]
    fn collects_changeset_files_only() {
        let context = collect(&[
            ".changeset/brave-fox.md",
            ".changeset/README.md",
            ".changeset/config.toml",
            ".changeset/nested/other.md",
        ]);

        assert_eq!(context.changeset_files, [".changeset/brave-fox.md"]);
        assert!(!context.is_release_pr());
    }

    #[test]
    fn release_manifest_marks_release_pr() {
        let context = collect(&[".changeset/release.md", "package.json", "CHANGELOG.md"]);

        assert!(context.is_release_pr());
        assert!(context.package_manifest_touched);
        assert!(context.root_changelog_touched);
        assert!(context.changeset_files.is_empty());
    }

    #[test]
    fn empty_input_has_no_changes() {
        let context = collect(&[]);

        assert_eq!(context, ChangedContext::default());
        assert!(!context.has_skill_changes());
    }

    #[test]
    fn honours_configured_directories() {
        let config = RepositoryConfig::default()
            .with_skills_dir("packages")
            .with_changeset_dir("changes");

        let context = collect_changed_context(
            &["packages/foo/SKILL.md", "changes/one.md", "skills/bar/SKILL.md"],
            &config,
        );

        assert_eq!(context.skill_ids.iter().collect::<Vec<_>>(), ["foo"]);
        assert_eq!(context.changeset_files, ["changes/one.md"]);
    }
}
