mod context;
mod engine;
mod policy;
mod result;
pub mod rules;

pub use context::VerificationContext;
pub use engine::VerificationEngine;
pub use policy::{VersionCheck, VersionPolicy, VersionViolation, ViolationKind};
pub use result::VerificationResult;
