use std::path::PathBuf;

use thiserror::Error;

use crate::verification::{VersionPolicy, VersionViolation};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Git(#[from] changeset_git::GitError),

    #[error(transparent)]
    Project(#[from] changeset_project::ProjectError),

    #[error(transparent)]
    Parse(#[from] changeset_parse::FormatError),

    #[error(transparent)]
    Manifest(#[from] changeset_manifest::ManifestError),

    #[error(transparent)]
    Changelog(#[from] changeset_changelog::ChangelogError),

    #[error("version calculation failed")]
    VersionCalculation(#[from] changeset_version::VersionError),

    #[error("failed to read changeset file '{path}'")]
    ChangesetFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse changeset file '{path}'")]
    ChangesetParse {
        path: PathBuf,
        #[source]
        source: changeset_parse::FormatError,
    },

    #[error("failed to remove changeset file '{path}'")]
    ChangesetRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write release notes to '{path}'")]
    ReleaseNotesWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove release manifest '{path}'")]
    ReleaseManifestRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("changeset '{changeset}' references unknown skill '{name}'")]
    UnknownSkill { name: String, changeset: PathBuf },

    #[error(
        "one or more skills changed, but no changeset file was added: {}", dirs.join(", ")
    )]
    MissingChangesets { dirs: Vec<String> },

    #[error("changed skills are not listed in any changeset: {}", uncovered.join(", "))]
    CoverageFailed { uncovered: Vec<String> },

    #[error("{} skill(s) violate the {policy} metadata.version policy", violations.len())]
    VersionPolicyViolation {
        policy: VersionPolicy,
        violations: Vec<VersionViolation>,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::ViolationKind;

    #[test]
    fn unknown_skill_error_names_skill_and_file() {
        let err = OperationError::UnknownSkill {
            name: "ghost".to_string(),
            changeset: PathBuf::from(".changeset/brave-fox.md"),
        };

        let msg = err.to_string();

        assert!(msg.contains("ghost"));
        assert!(msg.contains(".changeset/brave-fox.md"));
    }

    #[test]
    fn coverage_error_lists_every_uncovered_skill() {
        let err = OperationError::CoverageFailed {
            uncovered: vec!["alpha".to_string(), "beta".to_string()],
        };

        assert!(err.to_string().ends_with("alpha, beta"));
    }

    #[test]
    fn policy_error_counts_violations() {
        let err = OperationError::VersionPolicyViolation {
            policy: VersionPolicy::NoManualEdit,
            violations: vec![VersionViolation {
                skill_dir: "skills/foo".to_string(),
                kind: ViolationKind::ManualEdit {
                    from: semver::Version::new(1, 0, 0),
                    to: semver::Version::new(1, 1, 0),
                },
            }],
        };

        assert_eq!(
            err.to_string(),
            "1 skill(s) violate the no-manual-edit metadata.version policy"
        );
    }
}
