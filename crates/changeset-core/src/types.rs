use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic-version bump level. Ordering follows priority: `Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl BumpType {
    /// Rendering order for grouped release notes, highest first.
    pub const DESCENDING: [BumpType; 3] = [BumpType::Major, BumpType::Minor, BumpType::Patch];

    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Patch => 0,
            Self::Minor => 1,
            Self::Major => 2,
        }
    }

    /// Whether `next` outranks `current`. An unset `current` always loses.
    #[must_use]
    pub fn is_higher(next: BumpType, current: Option<BumpType>) -> bool {
        current.is_none_or(|current| next.rank() > current.rank())
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }

    #[must_use]
    pub fn heading_label(self) -> &'static str {
        match self {
            Self::Patch => "Patch",
            Self::Minor => "Minor",
            Self::Major => "Major",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown bump type '{0}' (expected major, minor or patch)")]
pub struct UnknownBumpType(pub String);

impl FromStr for BumpType {
    type Err = UnknownBumpType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            other => Err(UnknownBumpType(other.to_string())),
        }
    }
}

/// One parsed changeset document: which skills it bumps and the release note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    pub skills: IndexMap<String, BumpType>,
    pub body: String,
}

impl Changeset {
    /// Highest bump requested across every skill in this changeset.
    #[must_use]
    pub fn highest_bump(&self) -> Option<BumpType> {
        self.skills.values().copied().max()
    }
}

/// A skill package discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillInfo {
    pub name: String,
    /// Path of the skill's metadata document (`SKILL.md`).
    pub path: PathBuf,
}

impl SkillInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_type_ordering_patch_is_smallest() {
        assert!(BumpType::Patch < BumpType::Minor);
        assert!(BumpType::Patch < BumpType::Major);
    }

    #[test]
    fn bump_type_ordering_major_is_largest() {
        assert!(BumpType::Major > BumpType::Patch);
        assert!(BumpType::Major > BumpType::Minor);
    }

    #[test]
    fn rank_matches_ordering() {
        assert_eq!(BumpType::Patch.rank(), 0);
        assert_eq!(BumpType::Minor.rank(), 1);
        assert_eq!(BumpType::Major.rank(), 2);
    }

    #[test]
    fn first_observation_is_always_higher() {
        assert!(BumpType::is_higher(BumpType::Patch, None));
        assert!(BumpType::is_higher(BumpType::Major, None));
    }

    #[test]
    fn is_higher_is_strict() {
        let all = [BumpType::Patch, BumpType::Minor, BumpType::Major];
        for next in all {
            for current in all {
                assert_eq!(
                    BumpType::is_higher(next, Some(current)),
                    next.rank() > current.rank(),
                    "{next} vs {current}"
                );
            }
        }
    }

    #[test]
    fn parses_lowercase_names_only() {
        assert_eq!("minor".parse::<BumpType>(), Ok(BumpType::Minor));
        assert!("Minor".parse::<BumpType>().is_err());
    }

    #[test]
    fn descending_order_starts_with_major() {
        assert_eq!(
            BumpType::DESCENDING,
            [BumpType::Major, BumpType::Minor, BumpType::Patch]
        );
    }

    #[test]
    fn highest_bump_picks_max() {
        let mut skills = IndexMap::new();
        skills.insert("a".to_string(), BumpType::Patch);
        skills.insert("b".to_string(), BumpType::Major);
        skills.insert("c".to_string(), BumpType::Minor);
        let changeset = Changeset {
            skills,
            body: "Body".to_string(),
        };

        assert_eq!(changeset.highest_bump(), Some(BumpType::Major));
    }

    #[test]
    fn skill_dir_is_document_parent() {
        let skill = SkillInfo::new("foo", "/repo/skills/foo/SKILL.md");
        assert_eq!(skill.dir(), Path::new("/repo/skills/foo"));
    }
}
