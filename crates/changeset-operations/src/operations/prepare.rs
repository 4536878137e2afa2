use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use changeset_changelog::{
    GroupedNotes, GroupedRootNotes, HeadingLevel, RepoSlug, parse_repo_slug,
    render_grouped_notes, render_root_release_notes,
};
use changeset_core::{BumpType, SkillInfo};
use changeset_manifest::{ReleaseSection, render_release_manifest};
use changeset_project::SkillRepository;
use changeset_version::bump_version;
use chrono::NaiveDate;
use semver::Version;

use super::aggregation::{Aggregation, ChangesetRecord};
use crate::Result;
use crate::provenance::ChangesetProvenance;
use crate::traits::{
    ChangelogWriter, ChangesetReader, ChangesetWriter, GitProvider, ManifestWriter,
    ProjectProvider,
};

const SKILL_CHANGELOG: &str = "CHANGELOG.md";

pub struct PrepareInput {
    /// Date stamped on each skill changelog section.
    pub date: NaiveDate,
    pub dry_run: bool,
}

/// One skill's part of a release.
#[derive(Debug, Clone)]
pub struct SkillRelease {
    pub name: String,
    /// The skill's metadata document.
    pub document: PathBuf,
    pub bump: BumpType,
    pub current_version: Version,
    pub new_version: Version,
    pub notes: GroupedNotes,
}

impl SkillRelease {
    #[must_use]
    pub fn changelog_path(&self) -> PathBuf {
        self.document
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(SKILL_CHANGELOG)
    }
}

/// Everything a release pass would write, computed before touching disk.
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    pub bump: BumpType,
    /// Sorted by skill name.
    pub skills: Vec<SkillRelease>,
    pub current_package_version: Version,
    pub new_package_version: Version,
    pub root_notes: GroupedRootNotes,
    pub repo_slug: Option<RepoSlug>,
    pub changesets: Vec<PathBuf>,
}

impl ReleasePlan {
    #[must_use]
    pub fn skill_notes(&self, skill: &SkillRelease, level: HeadingLevel) -> String {
        render_grouped_notes(&skill.notes, self.repo_slug.as_ref(), level)
    }

    #[must_use]
    pub fn root_release_notes(&self) -> String {
        render_root_release_notes(&self.root_notes, self.repo_slug.as_ref())
    }

    #[must_use]
    pub fn release_manifest(&self) -> String {
        let sections: Vec<ReleaseSection> = self
            .skills
            .iter()
            .map(|skill| ReleaseSection {
                name: skill.name.clone(),
                version: skill.new_version.clone(),
                notes: self.skill_notes(skill, HeadingLevel::H4),
            })
            .collect();

        render_release_manifest(self.bump, &sections)
    }
}

#[derive(Debug)]
pub struct PrepareOutput {
    pub plan: ReleasePlan,
    /// Every file created or rewritten, in write order.
    pub written: Vec<PathBuf>,
    pub removed_changesets: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum PrepareOutcome {
    NoChangesets,
    DryRun(ReleasePlan),
    Prepared(PrepareOutput),
}

pub struct PrepareOperation<P, G, R, M, C> {
    project_provider: P,
    git_provider: G,
    changeset_io: R,
    manifest_writer: M,
    changelog_writer: C,
}

impl<P, G, R, M, C> PrepareOperation<P, G, R, M, C>
where
    P: ProjectProvider,
    G: GitProvider,
    R: ChangesetReader + ChangesetWriter,
    M: ManifestWriter,
    C: ChangelogWriter,
{
    pub fn new(
        project_provider: P,
        git_provider: G,
        changeset_io: R,
        manifest_writer: M,
        changelog_writer: C,
    ) -> Self {
        Self {
            project_provider,
            git_provider,
            changeset_io,
            manifest_writer,
            changelog_writer,
        }
    }

    /// Consumes every pending changeset into version bumps, changelogs and
    /// the release manifest, then removes the changesets.
    ///
    /// All inputs are read and validated before the first write, so a bad
    /// changeset or skill document leaves the tree untouched. Changesets are
    /// removed last.
    ///
    /// # Errors
    ///
    /// Returns an error if a changeset is invalid or names an unknown skill,
    /// a version cannot be read, or any file cannot be written.
    pub fn execute(&self, repo_root: &Path, input: &PrepareInput) -> Result<PrepareOutcome> {
        let repo = self.project_provider.open_repository(repo_root)?;
        let changesets = self.changeset_io.list_changesets(&repo)?;

        if changesets.is_empty() {
            tracing::info!("no changeset files found");
            return Ok(PrepareOutcome::NoChangesets);
        }

        let Some(plan) = self.plan(&repo, changesets)? else {
            return Ok(PrepareOutcome::NoChangesets);
        };

        if input.dry_run {
            return Ok(PrepareOutcome::DryRun(plan));
        }

        let output = self.apply(&repo, plan, input.date)?;
        Ok(PrepareOutcome::Prepared(output))
    }

    fn plan(
        &self,
        repo: &SkillRepository,
        changesets: Vec<PathBuf>,
    ) -> Result<Option<ReleasePlan>> {
        let skills: BTreeMap<String, SkillInfo> = self
            .project_provider
            .discover_skills(repo)?
            .into_iter()
            .map(|skill| (skill.name.clone(), skill))
            .collect();
        let known: BTreeSet<String> = skills.keys().cloned().collect();

        let records = changesets
            .iter()
            .map(|path| {
                let changeset = self.changeset_io.read_changeset(path)?;
                let provenance =
                    ChangesetProvenance::resolve(&self.git_provider, &repo.root, path);
                Ok(ChangesetRecord {
                    path: path.clone(),
                    changeset,
                    provenance,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let aggregation = Aggregation::fold(&records, &known)?;
        let Some(bump) = aggregation.release_bump() else {
            return Ok(None);
        };

        let mut releases = Vec::with_capacity(aggregation.bumps().len());
        let mut versions = BTreeMap::new();

        for (name, &skill_bump) in aggregation.bumps() {
            let Some(skill) = skills.get(name) else {
                continue;
            };
            let current_version = self.manifest_writer.read_skill_version(&skill.path)?;
            let new_version = bump_version(&current_version, skill_bump)?;
            tracing::debug!(skill = %name, %current_version, %new_version, "resolved skill version");

            versions.insert(name.clone(), new_version.clone());
            releases.push(SkillRelease {
                name: name.clone(),
                document: skill.path.clone(),
                bump: skill_bump,
                current_version,
                new_version,
                notes: aggregation.notes(name).cloned().unwrap_or_default(),
            });
        }

        let current_package_version = self
            .manifest_writer
            .read_package_version(&repo.package_manifest_path())?;
        let new_package_version = bump_version(&current_package_version, bump)?;

        Ok(Some(ReleasePlan {
            bump,
            skills: releases,
            current_package_version,
            new_package_version,
            root_notes: aggregation.root_notes(&versions),
            repo_slug: self.repo_slug(&repo.root),
            changesets,
        }))
    }

    fn repo_slug(&self, repo_root: &Path) -> Option<RepoSlug> {
        match self.git_provider.remote_url(repo_root) {
            Ok(Some(url)) => parse_repo_slug(&url),
            Ok(None) => None,
            Err(err) => {
                tracing::debug!(error = %err, "remote url unavailable");
                None
            }
        }
    }

    fn apply(
        &self,
        repo: &SkillRepository,
        plan: ReleasePlan,
        date: NaiveDate,
    ) -> Result<PrepareOutput> {
        let mut written = Vec::new();

        for skill in &plan.skills {
            self.manifest_writer
                .write_skill_version(&skill.document, &skill.new_version)?;
            written.push(skill.document.clone());

            let changelog = skill.changelog_path();
            let notes = plan.skill_notes(skill, HeadingLevel::H3);
            if self
                .changelog_writer
                .upsert_skill_release(&changelog, &skill.new_version, date, &notes)?
            {
                written.push(changelog);
            }

            tracing::info!(
                skill = %skill.name,
                from = %skill.current_version,
                to = %skill.new_version,
                bump = %skill.bump,
                "prepared skill release"
            );
        }

        let package_manifest = repo.package_manifest_path();
        self.manifest_writer
            .write_package_version(&package_manifest, &plan.new_package_version)?;
        written.push(package_manifest);

        let root_changelog = repo.root_changelog_path();
        if self.changelog_writer.insert_root_release(
            &root_changelog,
            &plan.new_package_version,
            &plan.root_release_notes(),
        )? {
            written.push(root_changelog);
        }

        let release_manifest = repo.release_manifest_path();
        self.manifest_writer
            .write_release_manifest(&release_manifest, &plan.release_manifest())?;
        written.push(release_manifest);

        let mut removed_changesets = Vec::with_capacity(plan.changesets.len());
        for path in &plan.changesets {
            self.changeset_io.remove_changeset(path)?;
            removed_changesets.push(path.clone());
        }

        Ok(PrepareOutput {
            plan,
            written,
            removed_changesets,
        })
    }
}
