use std::fmt;
use std::str::FromStr;

use semver::Version;

/// How `metadata.version` must change for a skill touched by a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPolicy {
    /// Release pull requests: every existing skill must move forward.
    RequireBump,
    /// Regular pull requests: versions belong to release automation.
    NoManualEdit,
}

impl VersionPolicy {
    #[must_use]
    pub fn for_pull_request(release_pr: bool) -> Self {
        if release_pr {
            Self::RequireBump
        } else {
            Self::NoManualEdit
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RequireBump => "require-bump",
            Self::NoManualEdit => "no-manual-edit",
        }
    }
}

impl fmt::Display for VersionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "require-bump" => Ok(Self::RequireBump),
            "no-manual-edit" => Ok(Self::NoManualEdit),
            other => Err(format!("unknown version policy '{other}'")),
        }
    }
}

/// Outcome for one changed skill that satisfied the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    Removed { skill_dir: String },
    MissingAtHead { skill_dir: String },
    Added { skill_dir: String, version: Version },
    Unchanged { skill_dir: String, version: Version },
    Bumped {
        skill_dir: String,
        from: Version,
        to: Version,
    },
}

impl fmt::Display for VersionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed { skill_dir } => {
                write!(f, "{skill_dir} removed in PR (skipping version check)")
            }
            Self::MissingAtHead { skill_dir } => {
                write!(f, "{skill_dir} has no skill document at HEAD (skipping)")
            }
            Self::Added { skill_dir, version } => {
                write!(f, "{skill_dir} added with metadata.version={version}")
            }
            Self::Unchanged { skill_dir, version } => {
                write!(f, "{skill_dir} metadata.version unchanged ({version})")
            }
            Self::Bumped { skill_dir, from, to } => {
                write!(f, "{skill_dir} version bump detected: {from} -> {to}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    NotBumped { version: Version },
    MovedBackwards { from: Version, to: Version },
    ManualEdit { from: Version, to: Version },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionViolation {
    pub skill_dir: String,
    pub kind: ViolationKind,
}

impl fmt::Display for VersionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = &self.skill_dir;
        match &self.kind {
            ViolationKind::NotBumped { version } => write!(
                f,
                "{dir} changed, but metadata.version was not updated (still {version})"
            ),
            ViolationKind::MovedBackwards { from, to } => write!(
                f,
                "{dir} changed, but metadata.version moved backwards ({from} -> {to})"
            ),
            ViolationKind::ManualEdit { from, to } => write!(
                f,
                "{dir} changed metadata.version ({from} -> {to}); do not edit metadata.version outside release PRs"
            ),
        }
    }
}
