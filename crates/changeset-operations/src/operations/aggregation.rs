use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use changeset_changelog::{
    GroupedNotes, GroupedRootNotes, NoteEntry, RootReleaseEntry, format_skill_section_heading,
};
use changeset_core::{BumpType, Changeset};
use semver::Version;

use crate::Result;
use crate::error::OperationError;
use crate::provenance::ChangesetProvenance;

/// A parsed changeset together with its resolved provenance.
#[derive(Debug, Clone)]
pub struct ChangesetRecord {
    pub path: PathBuf,
    pub changeset: Changeset,
    pub provenance: ChangesetProvenance,
}

/// A root changelog entry waiting for final skill versions.
#[derive(Debug, Clone)]
struct PendingRootEntry {
    bump_type: BumpType,
    body: String,
    provenance: ChangesetProvenance,
    skills: Vec<String>,
}

/// Bumps and notes folded from every changeset of one release.
///
/// Root entries keep skill names only; they become `name@version` strings in
/// [`Aggregation::root_notes`] once every skill's final version is known.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    bumps: BTreeMap<String, BumpType>,
    notes: BTreeMap<String, GroupedNotes>,
    root_entries: Vec<PendingRootEntry>,
}

impl Aggregation {
    /// Folds `records` in order. The highest bump requested for a skill wins
    /// and notes keep processing order within each bump bucket.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::UnknownSkill` if a changeset names a skill
    /// outside `known_skills`.
    pub fn fold(records: &[ChangesetRecord], known_skills: &BTreeSet<String>) -> Result<Self> {
        let mut aggregation = Self::default();
        for record in records {
            aggregation.add(record, known_skills)?;
        }
        Ok(aggregation)
    }

    fn add(&mut self, record: &ChangesetRecord, known_skills: &BTreeSet<String>) -> Result<()> {
        if let Some(name) = record
            .changeset
            .skills
            .keys()
            .find(|name| !known_skills.contains(*name))
        {
            return Err(OperationError::UnknownSkill {
                name: name.clone(),
                changeset: record.path.clone(),
            });
        }

        let provenance = &record.provenance;
        let mut highest = None;

        for (name, &bump) in &record.changeset.skills {
            if BumpType::is_higher(bump, self.bumps.get(name).copied()) {
                self.bumps.insert(name.clone(), bump);
            }

            self.notes.entry(name.clone()).or_default().push(
                bump,
                NoteEntry {
                    body: record.changeset.body.clone(),
                    pr_number: provenance.pr_number,
                    commit_sha: provenance.commit_sha.clone(),
                    author_login: provenance.author_login.clone(),
                },
            );

            if BumpType::is_higher(bump, highest) {
                highest = Some(bump);
            }
        }

        if let Some(bump_type) = highest {
            self.root_entries.push(PendingRootEntry {
                bump_type,
                body: record.changeset.body.clone(),
                provenance: provenance.clone(),
                skills: record.changeset.skills.keys().cloned().collect(),
            });
        }

        Ok(())
    }

    /// Final bump per touched skill, sorted by name.
    #[must_use]
    pub fn bumps(&self) -> &BTreeMap<String, BumpType> {
        &self.bumps
    }

    #[must_use]
    pub fn notes(&self, skill: &str) -> Option<&GroupedNotes> {
        self.notes.get(skill)
    }

    /// Highest bump across all touched skills, used for the package manifest.
    #[must_use]
    pub fn release_bump(&self) -> Option<BumpType> {
        self.bumps.values().copied().max()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bumps.is_empty()
    }

    /// Groups root entries by each changeset's highest bump, naming skills
    /// with their final versions from `versions`.
    #[must_use]
    pub fn root_notes(&self, versions: &BTreeMap<String, Version>) -> GroupedRootNotes {
        let mut grouped = GroupedRootNotes::new();

        for entry in &self.root_entries {
            let packages = entry
                .skills
                .iter()
                .filter_map(|name| {
                    versions
                        .get(name)
                        .map(|version| format_skill_section_heading(name, version))
                })
                .collect();

            grouped.push(
                entry.bump_type,
                RootReleaseEntry {
                    bump_type: entry.bump_type,
                    body: entry.body.clone(),
                    pr_number: entry.provenance.pr_number,
                    pr_title: entry.provenance.pr_title.clone(),
                    commit_sha: entry.provenance.commit_sha.clone(),
                    packages,
                },
            );
        }

        grouped
    }
}
