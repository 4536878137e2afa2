use std::cmp::Ordering;

use changeset_manifest::extract_version;
use changeset_version::compare_versions;
use semver::Version;

use super::{VerificationContext, VerificationResult, VerificationRule};
use crate::Result;
use crate::traits::GitProvider;
use crate::verification::{VersionCheck, VersionPolicy, VersionViolation, ViolationKind};

/// Compares each changed skill's `metadata.version` at the base and head refs.
///
/// Skills added or removed by the PR are exempt.
pub struct VersionPolicyRule<'a, G: GitProvider> {
    git: &'a G,
    policy: VersionPolicy,
}

impl<'a, G: GitProvider> VersionPolicyRule<'a, G> {
    pub fn new(git: &'a G, policy: VersionPolicy) -> Self {
        Self { git, policy }
    }

    /// The version recorded at `refspec`, `None` when the document is absent
    /// or carries no readable version.
    fn version_at(
        &self,
        context: &VerificationContext,
        refspec: &str,
        document: &str,
    ) -> Result<Option<Version>> {
        if !self
            .git
            .path_exists_at_ref(&context.repo_root, refspec, document)?
        {
            return Ok(None);
        }

        let Some(content) = self.git.file_at_ref(&context.repo_root, refspec, document)? else {
            return Ok(None);
        };

        match extract_version(&content) {
            Ok(version) => Ok(Some(version)),
            Err(err) => {
                tracing::debug!(%refspec, %document, error = %err, "no metadata.version");
                Ok(None)
            }
        }
    }

    fn evaluate(
        &self,
        skill_dir: &str,
        base: Version,
        head: Version,
    ) -> std::result::Result<VersionCheck, ViolationKind> {
        let ordering = compare_versions(&head, &base);
        match (self.policy, ordering) {
            (VersionPolicy::RequireBump, Ordering::Equal) => {
                Err(ViolationKind::NotBumped { version: head })
            }
            (VersionPolicy::RequireBump, Ordering::Less) => Err(ViolationKind::MovedBackwards {
                from: base,
                to: head,
            }),
            (VersionPolicy::RequireBump, Ordering::Greater) => Ok(VersionCheck::Bumped {
                skill_dir: skill_dir.to_string(),
                from: base,
                to: head,
            }),
            (VersionPolicy::NoManualEdit, Ordering::Equal) => Ok(VersionCheck::Unchanged {
                skill_dir: skill_dir.to_string(),
                version: head,
            }),
            (VersionPolicy::NoManualEdit, _) => Err(ViolationKind::ManualEdit {
                from: base,
                to: head,
            }),
        }
    }
}

impl<G: GitProvider> VerificationRule for VersionPolicyRule<'_, G> {
    fn check(&self, context: &VerificationContext, result: &mut VerificationResult) -> Result<()> {
        for skill_dir in &context.changed.skill_dirs {
            let document = context.skill_document(skill_dir);
            let head = self.version_at(context, &context.head, &document)?;
            let base = self.version_at(context, &context.base, &document)?;

            let outcome = match (base, head) {
                (Some(_), None) => Ok(VersionCheck::Removed {
                    skill_dir: skill_dir.clone(),
                }),
                (None, None) => Ok(VersionCheck::MissingAtHead {
                    skill_dir: skill_dir.clone(),
                }),
                (None, Some(version)) => Ok(VersionCheck::Added {
                    skill_dir: skill_dir.clone(),
                    version,
                }),
                (Some(base), Some(head)) => self.evaluate(skill_dir, base, head),
            };

            match outcome {
                Ok(check) => result.version_checks.push(check),
                Err(kind) => result.violations.push(VersionViolation {
                    skill_dir: skill_dir.clone(),
                    kind,
                }),
            }
        }

        Ok(())
    }
}
