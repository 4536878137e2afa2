use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use changeset_version::parse_version;
use regex::Regex;
use semver::Version;

use crate::error::{ManifestError, MetadataError};

const METADATA_HEADING: &str = "metadata:";
const DEFAULT_INDENT: &str = "  ";

static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\s*)version:\s*"?(\d+\.\d+\.\d+)"?\s*$"#).expect("version line pattern is valid")
});

/// Line indices of a `metadata:` heading and the indented lines nested under it.
struct BlockLines {
    heading: usize,
    body: Range<usize>,
}

fn strip_newline(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

fn locate_block(lines: &[&str]) -> Option<BlockLines> {
    let heading = lines
        .iter()
        .position(|line| strip_newline(line).trim_end() == METADATA_HEADING)?;

    let start = heading + 1;
    let end = lines[start..]
        .iter()
        .position(|line| line.starts_with(|c: char| !c.is_whitespace()))
        .map_or(lines.len(), |offset| start + offset);

    Some(BlockLines {
        heading,
        body: start..end,
    })
}

fn find_version_line(lines: &[&str], block: &BlockLines) -> Option<usize> {
    block
        .body
        .clone()
        .find(|&index| VERSION_LINE.is_match(strip_newline(lines[index])))
}

/// Text nested under the `metadata:` heading, up to the first dedented line or
/// closing `---`.
#[must_use]
pub fn metadata_block(content: &str) -> Option<String> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let block = locate_block(&lines)?;
    Some(lines[block.body].concat())
}

/// # Errors
///
/// Returns [`MetadataError::MissingMetadataBlock`] or
/// [`MetadataError::MissingMetadataVersion`] when the document does not carry a
/// parseable `metadata.version`. A missing version is never defaulted.
pub fn extract_version(content: &str) -> Result<Version, MetadataError> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let block = locate_block(&lines).ok_or(MetadataError::MissingMetadataBlock)?;
    let index = find_version_line(&lines, &block).ok_or(MetadataError::MissingMetadataVersion)?;

    let captures = VERSION_LINE
        .captures(strip_newline(lines[index]))
        .ok_or(MetadataError::MissingMetadataVersion)?;

    Ok(parse_version(&captures[2])?)
}

/// Returns a copy of `content` whose `metadata.version` is `version`.
///
/// An existing version line is rewritten in place with its indentation; otherwise
/// a new line is inserted directly under the `metadata:` heading. Every other
/// byte of the document is preserved.
///
/// # Errors
///
/// Returns [`MetadataError::MissingMetadataBlock`] if there is no block to write into.
pub fn update_version(content: &str, version: &Version) -> Result<String, MetadataError> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let block = locate_block(&lines).ok_or(MetadataError::MissingMetadataBlock)?;

    let mut output = String::with_capacity(content.len() + 24);

    if let Some(index) = find_version_line(&lines, &block) {
        let line = lines[index];
        let indent = VERSION_LINE
            .captures(strip_newline(line))
            .and_then(|captures| captures.get(1))
            .map_or(DEFAULT_INDENT, |m| m.as_str());
        let newline = &line[strip_newline(line).len()..];

        for (i, existing) in lines.iter().enumerate() {
            if i == index {
                output.push_str(&format!("{indent}version: \"{version}\"{newline}"));
            } else {
                output.push_str(existing);
            }
        }
        return Ok(output);
    }

    let indent = lines[block.body.clone()]
        .iter()
        .map(|line| strip_newline(line))
        .find(|line| !line.trim().is_empty())
        .map_or(DEFAULT_INDENT, |line| {
            &line[..line.len() - line.trim_start().len()]
        });

    for (i, existing) in lines.iter().enumerate() {
        output.push_str(existing);
        if i == block.heading {
            if !existing.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&format!("{indent}version: \"{version}\"\n"));
        }
    }

    Ok(output)
}

/// # Errors
///
/// Returns [`ManifestError::Read`] or [`ManifestError::Metadata`].
pub fn read_skill_version(path: &Path) -> Result<Version, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    extract_version(&content).map_err(|source| ManifestError::Metadata {
        path: path.to_path_buf(),
        source,
    })
}

/// # Errors
///
/// Returns an error if the document cannot be read, has no metadata block, or
/// cannot be written back.
pub fn write_skill_version(path: &Path, version: &Version) -> Result<(), ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let updated = update_version(&content, version).map_err(|source| ManifestError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::write(path, updated).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}
