use std::path::PathBuf;

use changeset_parse::parse_changeset;

use super::{VerificationContext, VerificationResult, VerificationRule};
use crate::Result;
use crate::error::OperationError;
use crate::traits::GitProvider;

/// Every changed skill must be named by a changeset changed in the same PR.
///
/// Changesets are read as committed at `head`; ones deleted by the PR are skipped.
pub struct CoverageRule<'a, G: GitProvider> {
    git: &'a G,
}

impl<'a, G: GitProvider> CoverageRule<'a, G> {
    pub fn new(git: &'a G) -> Self {
        Self { git }
    }
}

impl<G: GitProvider> VerificationRule for CoverageRule<'_, G> {
    fn check(&self, context: &VerificationContext, result: &mut VerificationResult) -> Result<()> {
        for path in &context.changed.changeset_files {
            let Some(content) = self
                .git
                .file_at_ref(&context.repo_root, &context.head, path)?
            else {
                tracing::debug!(%path, "changeset not present at head, skipping");
                continue;
            };

            let changeset =
                parse_changeset(&content).map_err(|source| OperationError::ChangesetParse {
                    path: PathBuf::from(path),
                    source,
                })?;

            result.covered_skills.extend(changeset.skills);
        }

        result.uncovered_skills = context
            .changed
            .skill_ids
            .iter()
            .filter(|id| !result.covered_skills.contains_key(*id))
            .cloned()
            .collect();

        Ok(())
    }
}
