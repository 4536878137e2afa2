mod coverage;
mod version_policy;

pub use coverage::CoverageRule;
pub use version_policy::VersionPolicyRule;

use super::{VerificationContext, VerificationResult};
use crate::Result;

pub trait VerificationRule {
    /// # Errors
    ///
    /// Returns an error if the rule check cannot be completed.
    fn check(&self, context: &VerificationContext, result: &mut VerificationResult) -> Result<()>;
}
