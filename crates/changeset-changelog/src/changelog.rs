use std::io::ErrorKind;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use semver::Version;

use crate::error::ChangelogError;

const CHANGELOG_TITLE: &str = "# Changelog";
const UNRELEASED_TITLE: &str = "[Unreleased]";

pub const ROOT_CHANGELOG_PREAMBLE: &str =
    "# Changelog\n\nAll notable changes to this repository are documented in this file.\n\n";

static H2_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##[ \t]+(.+)$").expect("h2 heading pattern is valid"));

#[derive(Debug, Clone)]
struct Heading<'a> {
    title: &'a str,
    line: Range<usize>,
}

impl Heading<'_> {
    fn is_unreleased(&self) -> bool {
        self.title.eq_ignore_ascii_case(UNRELEASED_TITLE)
    }

    /// Whether the heading names `version`, as `v1.2.0`, `1.2.0` or
    /// `1.2.0 - 2024-01-01`.
    fn names_version(&self, version: &str) -> bool {
        let label = self.title.split_whitespace().next().unwrap_or_default();
        label.strip_prefix('v').unwrap_or(label) == version
    }
}

fn h2_headings(content: &str) -> Vec<Heading<'_>> {
    H2_HEADING
        .captures_iter(content)
        .filter_map(|captures| {
            let line = captures.get(0)?.range();
            let title = captures.get(1)?.as_str().trim();
            Some(Heading { title, line })
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Changelog {
    content: String,
}

impl Default for Changelog {
    fn default() -> Self {
        Self::new()
    }
}

impl Changelog {
    /// An empty per-skill changelog carrying only the `# Changelog` title.
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: format!("{CHANGELOG_TITLE}\n\n"),
        }
    }

    /// An empty root changelog with the repository preamble.
    #[must_use]
    pub fn new_root() -> Self {
        Self {
            content: ROOT_CHANGELOG_PREAMBLE.to_string(),
        }
    }

    #[must_use]
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ChangelogError> {
        let content = std::fs::read_to_string(path).map_err(|source| ChangelogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { content })
    }

    /// Reads the changelog at `path`, or starts from `fallback` when the file
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file exists but cannot be read.
    pub fn from_file_or(path: &Path, fallback: impl FnOnce() -> Self) -> Result<Self, ChangelogError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self { content }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(fallback()),
            Err(source) => Err(ChangelogError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn into_content(self) -> String {
        self.content
    }

    #[must_use]
    pub fn has_release_heading(&self, version: &Version) -> bool {
        let version = version.to_string();
        h2_headings(&self.content)
            .iter()
            .any(|heading| heading.names_version(&version))
    }

    /// Prepends a `## {version} - {date}` section directly below the
    /// `# Changelog` title, or at the very top when there is no title.
    ///
    /// Returns `false` and leaves the document untouched when a heading for
    /// `version` already exists.
    pub fn upsert_skill_release(&mut self, version: &Version, date: NaiveDate, notes: &str) -> bool {
        if self.has_release_heading(version) {
            return false;
        }

        let entry = format!("## {version} - {}\n\n{notes}", date.format("%Y-%m-%d"));

        let updated = match strip_title(&self.content) {
            Some(rest) => format!("{CHANGELOG_TITLE}\n\n{entry}\n{rest}"),
            None => format!("{entry}\n{}", self.content),
        };

        self.content = format!("{}\n", updated.trim_end());
        true
    }

    /// Inserts a `## v{version}` section above the most recent release.
    ///
    /// An `## [Unreleased]` section stays on top. Returns `false` when the
    /// version heading already exists.
    pub fn insert_root_release(&mut self, version: &Version, notes: &str) -> bool {
        if self.has_release_heading(version) {
            return false;
        }

        let section = format!("## v{version}\n\n{}\n", notes.trim_end());

        let insertion_point = h2_headings(&self.content)
            .iter()
            .find(|heading| !heading.is_unreleased())
            .map(|heading| heading.line.start);

        let updated = match insertion_point {
            Some(point) => {
                let head = self.content[..point].trim_end();
                let tail = &self.content[point..];
                if head.is_empty() {
                    format!("{section}\n{tail}")
                } else {
                    format!("{head}\n\n{section}\n{tail}")
                }
            }
            None => {
                let head = self.content.trim_end();
                if head.is_empty() {
                    section
                } else {
                    format!("{head}\n\n{section}")
                }
            }
        };

        self.content = format!("{}\n", updated.trim_end());
        true
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Write` if the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ChangelogError> {
        std::fs::write(path, &self.content).map_err(|source| ChangelogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn strip_title(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(CHANGELOG_TITLE)?;
    let first_line_end = rest.find('\n').unwrap_or(rest.len());
    if !rest[..first_line_end].trim().is_empty() {
        return None;
    }
    Some(rest.trim_start())
}

/// Extracts the notes of the newest release, which must be `version`.
///
/// An `## [Unreleased]` heading is not a release and is skipped. The returned
/// body is trimmed.
///
/// # Errors
///
/// Returns `ChangelogError::NoReleaseHeadings` if the document has no H2 headings,
/// `ChangelogError::MissingReleaseHeading` if no heading names `version`,
/// `ChangelogError::ReleaseNotLatest` if a newer release precedes it, and
/// `ChangelogError::EmptyRelease` if its section is blank.
pub fn latest_release_body(content: &str, version: &Version) -> Result<String, ChangelogError> {
    let headings = h2_headings(content);
    let releases: Vec<(usize, &Heading<'_>)> = headings
        .iter()
        .enumerate()
        .filter(|(_, heading)| !heading.is_unreleased())
        .collect();

    let Some(&(latest_index, latest)) = releases.first() else {
        return Err(ChangelogError::NoReleaseHeadings);
    };

    let label = version.to_string();
    if !releases.iter().any(|(_, heading)| heading.names_version(&label)) {
        return Err(ChangelogError::MissingReleaseHeading { version: label });
    }

    if !(latest.title == label || latest.title == format!("v{label}")) {
        return Err(ChangelogError::ReleaseNotLatest {
            version: label,
            latest: latest.title.to_string(),
        });
    }

    let body_end = headings
        .get(latest_index + 1)
        .map_or(content.len(), |next| next.line.start);
    let body = content[latest.line.end..body_end].trim();

    if body.is_empty() {
        return Err(ChangelogError::EmptyRelease { version: label });
    }

    Ok(body.to_string())
}
