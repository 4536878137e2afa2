use std::path::Path;
use std::sync::LazyLock;

use changeset_core::BumpType;
use changeset_parse::split_front_matter;
use changeset_version::parse_version;
use regex::Regex;
use semver::Version;
use serde::Deserialize;

use crate::error::ManifestError;

static RELEASED_SKILL_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^## ([a-z0-9][a-z0-9-]*)@(\d+\.\d+\.\d+)$")
        .expect("released skill heading pattern is valid")
});

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ReleaseFrontMatter {
    bump: BumpType,
}

/// One skill's block in the release manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSection {
    pub name: String,
    pub version: Version,
    /// Pre-rendered markdown notes for this skill.
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseManifest {
    pub bump: BumpType,
    /// Released skills in manifest order, each listed once.
    pub skills: Vec<(String, Version)>,
}

impl ReleaseManifest {
    #[must_use]
    pub fn skill_names(&self) -> Vec<&str> {
        self.skills.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// Renders the `bump:` frontmatter followed by one `## name@version` heading per skill.
#[must_use]
pub fn render_release_manifest(bump: BumpType, sections: &[ReleaseSection]) -> String {
    let mut output = format!("---\nbump: {bump}\n---\n");

    for section in sections {
        output.push_str("\n## ");
        output.push_str(&section.name);
        output.push('@');
        output.push_str(&section.version.to_string());
        output.push('\n');

        let notes = section.notes.trim();
        if !notes.is_empty() {
            output.push('\n');
            output.push_str(notes);
            output.push('\n');
        }
    }

    output
}

/// # Errors
///
/// Returns [`ManifestError::MissingReleaseFrontMatter`] or
/// [`ManifestError::ReleaseFrontMatter`] when the `bump:` frontmatter is absent
/// or malformed.
pub fn parse_release_manifest(content: &str) -> Result<ReleaseManifest, ManifestError> {
    let normalized = content.replace("\r\n", "\n");
    let (front_matter, body) =
        split_front_matter(&normalized).ok_or(ManifestError::MissingReleaseFrontMatter)?;

    let parsed: ReleaseFrontMatter =
        serde_yml::from_str(front_matter).map_err(ManifestError::ReleaseFrontMatter)?;

    let mut skills: Vec<(String, Version)> = Vec::new();
    for line in body.lines().map(str::trim_end) {
        let Some(captures) = RELEASED_SKILL_HEADING.captures(line) else {
            continue;
        };
        let Ok(version) = parse_version(&captures[2]) else {
            continue;
        };
        if skills.iter().any(|(name, _)| name == &captures[1]) {
            continue;
        }
        skills.push((captures[1].to_string(), version));
    }

    Ok(ReleaseManifest {
        bump: parsed.bump,
        skills,
    })
}

/// Reads the release manifest, returning `None` when it is missing or blank.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn read_release_manifest(path: &Path) -> Result<Option<ReleaseManifest>, ManifestError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ManifestError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    parse_release_manifest(&content).map(Some)
}
