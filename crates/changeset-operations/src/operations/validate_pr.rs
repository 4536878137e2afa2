use std::path::Path;

use changeset_git::FileChange;
use changeset_project::{ChangedContext, collect_changed_context};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{GitProvider, ProjectProvider};
use crate::verification::rules::{CoverageRule, VersionPolicyRule};
use crate::verification::{
    VerificationContext, VerificationEngine, VerificationResult, VersionPolicy,
};

pub struct ValidatePrInput {
    /// Ref the pull request targets, e.g. `origin/main`.
    pub base: String,
    pub head: String,
    /// Overrides the policy chosen from the kind of pull request.
    pub policy: Option<VersionPolicy>,
}

impl ValidatePrInput {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            head: "HEAD".to_string(),
            policy: None,
        }
    }
}

#[derive(Debug)]
pub struct ValidationReport {
    pub release_pr: bool,
    pub policy: VersionPolicy,
    pub changed: ChangedContext,
    /// `false` for release PRs, whose changesets have been consumed.
    pub coverage_checked: bool,
    pub result: VerificationResult,
}

#[derive(Debug)]
pub enum ValidatePrOutcome {
    NoChanges,
    NoSkillChanges { changed_file_count: usize },
    Passed(ValidationReport),
}

pub struct ValidatePrOperation<P, G> {
    project_provider: P,
    git_provider: G,
}

impl<P, G> ValidatePrOperation<P, G>
where
    P: ProjectProvider,
    G: GitProvider,
{
    pub fn new(project_provider: P, git_provider: G) -> Self {
        Self {
            project_provider,
            git_provider,
        }
    }

    /// Checks that changed skills are covered by changesets and that their
    /// `metadata.version` follows the active policy.
    ///
    /// Every uncovered skill and every policy violation is collected before
    /// failing.
    ///
    /// # Errors
    ///
    /// Returns `MissingChangesets`, `CoverageFailed` or `VersionPolicyViolation`
    /// when the pull request breaks a rule, and other errors when git or a
    /// changeset cannot be read.
    pub fn execute(&self, repo_root: &Path, input: &ValidatePrInput) -> Result<ValidatePrOutcome> {
        let repo = self.project_provider.open_repository(repo_root)?;

        let changes = self
            .git_provider
            .changed_files(&repo.root, &input.base, &input.head)?;
        if changes.is_empty() {
            return Ok(ValidatePrOutcome::NoChanges);
        }

        let paths = changed_paths(&changes);
        let changed = collect_changed_context(&paths, &repo.config);

        if !changed.has_skill_changes() {
            return Ok(ValidatePrOutcome::NoSkillChanges {
                changed_file_count: changes.len(),
            });
        }

        let release_pr = changed.is_release_pr();
        if changed.changeset_files.is_empty() && !release_pr {
            return Err(OperationError::MissingChangesets {
                dirs: changed.skill_dirs.iter().cloned().collect(),
            });
        }

        let policy = input
            .policy
            .unwrap_or_else(|| VersionPolicy::for_pull_request(release_pr));
        tracing::debug!(release_pr, %policy, base = %input.base, "validating pull request");

        let context = VerificationContext {
            repo_root: repo.root.clone(),
            base: input.base.clone(),
            head: input.head.clone(),
            skill_file: repo.config.skill_file().to_string(),
            changed,
        };

        let coverage_rule = CoverageRule::new(&self.git_provider);
        let policy_rule = VersionPolicyRule::new(&self.git_provider, policy);

        let mut engine = VerificationEngine::new();
        if !release_pr {
            engine.add_rule(&coverage_rule);
        }
        engine.add_rule(&policy_rule);

        let result = engine.verify(&context)?;

        if !result.uncovered_skills.is_empty() {
            return Err(OperationError::CoverageFailed {
                uncovered: result.uncovered_skills,
            });
        }
        if !result.violations.is_empty() {
            return Err(OperationError::VersionPolicyViolation {
                policy,
                violations: result.violations,
            });
        }

        Ok(ValidatePrOutcome::Passed(ValidationReport {
            release_pr,
            policy,
            changed: context.changed,
            coverage_checked: !release_pr,
            result,
        }))
    }
}

/// Repo-relative `/` paths of every changed file; renames count both sides.
fn changed_paths(changes: &[FileChange]) -> Vec<String> {
    changes
        .iter()
        .flat_map(|change| std::iter::once(&change.path).chain(change.old_path.as_ref()))
        .map(|path| to_slash(path))
        .collect()
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
