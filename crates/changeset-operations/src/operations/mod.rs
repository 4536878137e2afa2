mod aggregation;
mod finalize;
mod list;
mod prepare;
mod validate_pr;

pub use aggregation::{Aggregation, ChangesetRecord};
pub use finalize::{FinalizeOperation, FinalizeOutput};
pub use list::{ChangesetSummary, ListOperation};
pub use prepare::{
    PrepareInput, PrepareOperation, PrepareOutcome, PrepareOutput, ReleasePlan, SkillRelease,
};
pub use validate_pr::{
    ValidatePrInput, ValidatePrOperation, ValidatePrOutcome, ValidationReport,
};
