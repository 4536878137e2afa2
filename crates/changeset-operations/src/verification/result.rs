use std::collections::BTreeMap;

use changeset_core::BumpType;

use super::{VersionCheck, VersionViolation};

#[derive(Debug, Default)]
pub struct VerificationResult {
    /// Skills named by the changed changesets, with the bump each requested.
    pub covered_skills: BTreeMap<String, BumpType>,
    pub uncovered_skills: Vec<String>,
    pub version_checks: Vec<VersionCheck>,
    pub violations: Vec<VersionViolation>,
}

impl VerificationResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.uncovered_skills.is_empty() && self.violations.is_empty()
    }
}
