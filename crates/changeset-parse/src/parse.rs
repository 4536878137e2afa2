use std::borrow::Cow;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use changeset_core::{BumpType, Changeset};

use crate::error::{FormatError, FrontMatterError, ValidationError};

pub(crate) const FRONT_MATTER_DELIMITER: &str = "---";

const MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

static ENTRY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"?([a-z0-9][a-z0-9-]*)"?\s*:\s*(major|minor|patch)$"#)
        .expect("entry line pattern is valid")
});

pub(crate) fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if content.contains("\r\n") {
        Cow::Owned(content.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// Splits `---\n{frontmatter}\n---{body}` into its two halves.
///
/// The closing delimiter is the first `\n---` after the opening line. A single
/// newline directly after it belongs to the delimiter, not the body.
#[must_use]
pub fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let after_opening = content
        .strip_prefix(FRONT_MATTER_DELIMITER)?
        .strip_prefix('\n')?;

    let closing = after_opening.find("\n---")?;
    let front_matter = &after_opening[..closing];
    let after_closing = &after_opening[closing + 1 + FRONT_MATTER_DELIMITER.len()..];
    let body = after_closing.strip_prefix('\n').unwrap_or(after_closing);

    Some((front_matter, body))
}

/// Removes a `#` comment that starts the line or follows whitespace, then trims.
#[must_use]
pub fn strip_comment(line: &str) -> &str {
    let mut previous_is_space = true;
    for (index, ch) in line.char_indices() {
        if ch == '#' && previous_is_space {
            return line[..index].trim();
        }
        previous_is_space = ch.is_whitespace();
    }
    line.trim()
}

/// Parses one frontmatter line. Blank and comment-only lines yield `None`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEntryLine`] naming the raw line when it is
/// neither blank nor a `"skill-name": bump` entry.
pub fn parse_entry_line(raw_line: &str) -> Result<Option<(String, BumpType)>, ValidationError> {
    let line = strip_comment(raw_line);
    if line.is_empty() {
        return Ok(None);
    }

    let captures = ENTRY_LINE
        .captures(line)
        .ok_or_else(|| ValidationError::InvalidEntryLine {
            line: raw_line.to_string(),
        })?;

    let bump_type = captures[2]
        .parse::<BumpType>()
        .map_err(|_| ValidationError::InvalidEntryLine {
            line: raw_line.to_string(),
        })?;

    Ok(Some((captures[1].to_string(), bump_type)))
}

#[must_use = "parsing result should be handled"]
pub fn parse_changeset(content: &str) -> Result<Changeset, FormatError> {
    if content.len() > MAX_INPUT_SIZE {
        return Err(ValidationError::InputTooLarge {
            max_bytes: MAX_INPUT_SIZE,
        }
        .into());
    }

    let content = normalize_line_endings(content);
    let (front_matter, body) =
        split_front_matter(&content).ok_or(FrontMatterError::MissingDelimiters)?;

    let mut skills = IndexMap::new();
    for raw_line in front_matter.split('\n') {
        let Some((name, bump_type)) = parse_entry_line(raw_line)? else {
            continue;
        };
        if skills.contains_key(&name) {
            return Err(ValidationError::DuplicateEntry { name }.into());
        }
        skills.insert(name, bump_type);
    }

    if skills.is_empty() {
        return Err(ValidationError::NoEntries.into());
    }

    let body = body.trim();
    if body.is_empty() {
        return Err(ValidationError::EmptyBody.into());
    }

    Ok(Changeset {
        skills,
        body: body.to_string(),
    })
}

/// Best-effort entry scan used for listings: malformed lines are skipped and a
/// missing frontmatter block yields an empty map.
#[must_use]
pub fn scan_entries(content: &str) -> IndexMap<String, BumpType> {
    let content = normalize_line_endings(content);
    let Some((front_matter, _)) = split_front_matter(&content) else {
        return IndexMap::new();
    };

    front_matter
        .split('\n')
        .filter_map(|line| parse_entry_line(line).ok().flatten())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_skill_with_body() {
        let content = "---\n\"foo\": minor\n---\nAdds X.\n";

        let changeset = parse_changeset(content).expect("should parse");
        assert_eq!(changeset.skills.len(), 1);
        assert_eq!(changeset.skills.get("foo"), Some(&BumpType::Minor));
        assert_eq!(changeset.body, "Adds X.");
    }

    #[test]
    fn multiple_skills_preserve_order() {
        let content = r#"---
"skill-one": major
skill-two: minor
"skill-three" : patch
---
Breaking change to API.
"#;

        let changeset = parse_changeset(content).expect("should parse");
        let names: Vec<_> = changeset.skills.keys().map(String::as_str).collect();
        assert_eq!(names, ["skill-one", "skill-two", "skill-three"]);
        assert_eq!(changeset.skills["skill-three"], BumpType::Patch);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let content = "---\n# which skills\n\n\"foo\": patch # typo fix\n   \n---\nFix.\n";

        let changeset = parse_changeset(content).expect("should parse");
        assert_eq!(changeset.skills.len(), 1);
        assert_eq!(changeset.skills["foo"], BumpType::Patch);
    }

    #[test]
    fn parsing_is_idempotent() {
        let content = "---\n\"foo\": minor\n\"bar\": patch\n---\n\nLine one\n\n- detail\n";

        let first = parse_changeset(content).expect("should parse");
        let second = parse_changeset(content).expect("should parse");
        assert_eq!(first, second);
    }

    #[test]
    fn multiline_body_is_trimmed_not_flattened() {
        let content = "---\nfoo: minor\n---\n\n  Title line\n\n- one\n- two\n\n";

        let changeset = parse_changeset(content).expect("should parse");
        assert_eq!(changeset.body, "Title line\n\n- one\n- two");
    }

    #[test]
    fn delimiter_inside_body() {
        let content = "---\nfoo: patch\n---\nSummary with --- inside.\n\n---\n\nMore.\n";

        let changeset = parse_changeset(content).expect("should parse");
        assert!(changeset.body.starts_with("Summary with --- inside."));
        assert!(changeset.body.ends_with("More."));
    }

    #[test]
    fn windows_line_endings() {
        let content = "---\r\n\"foo\": patch\r\n---\r\nWindows style body.\r\n";

        let changeset = parse_changeset(content).expect("should parse");
        assert_eq!(changeset.skills["foo"], BumpType::Patch);
        assert_eq!(changeset.body, "Windows style body.");
    }

    #[test]
    fn error_missing_front_matter() {
        let content = "\"foo\": patch\n---\nBody.\n";

        let err = parse_changeset(content).expect_err("should fail");
        assert_eq!(err, FormatError::from(FrontMatterError::MissingDelimiters));
    }

    #[test]
    fn error_missing_closing_delimiter() {
        let content = "---\n\"foo\": patch\nBody without closing delimiter.\n";

        let err = parse_changeset(content).expect_err("should fail");
        assert!(err.to_string().contains("missing frontmatter delimiters"));
    }

    #[test]
    fn error_invalid_bump_type_names_line() {
        let content = "---\n\"foo\": huge\n---\nBody.\n";

        let err = parse_changeset(content).expect_err("should fail");
        assert_eq!(
            err,
            FormatError::from(ValidationError::InvalidEntryLine {
                line: "\"foo\": huge".to_string()
            })
        );
    }

    #[test]
    fn error_uppercase_skill_name() {
        let content = "---\nFoo: patch\n---\nBody.\n";

        let err = parse_changeset(content).expect_err("should fail");
        assert!(err.to_string().contains("Foo: patch"));
    }

    #[test]
    fn error_no_entries() {
        let content = "---\n# nothing here\n---\nBody.\n";

        let err = parse_changeset(content).expect_err("should fail");
        assert_eq!(err, FormatError::from(ValidationError::NoEntries));
    }

    #[test]
    fn error_empty_front_matter() {
        let content = "---\n\n---\nBody.\n";

        let err = parse_changeset(content).expect_err("should fail");
        assert_eq!(err, FormatError::from(ValidationError::NoEntries));
    }

    #[test]
    fn error_empty_body() {
        let content = "---\nfoo: patch\n---\n   \n\t\n";

        let err = parse_changeset(content).expect_err("should fail");
        assert_eq!(err, FormatError::from(ValidationError::EmptyBody));
    }

    #[test]
    fn error_duplicate_skill() {
        let content = "---\nfoo: major\n\"foo\": patch\n---\nBody.\n";

        let err = parse_changeset(content).expect_err("should fail");
        assert_eq!(
            err,
            FormatError::from(ValidationError::DuplicateEntry {
                name: "foo".to_string()
            })
        );
    }

    #[test]
    fn error_input_too_large() {
        let huge_content = "a".repeat(MAX_INPUT_SIZE + 1);

        let err = parse_changeset(&huge_content).expect_err("should fail");
        assert!(err.to_string().contains("maximum size"));
    }

    #[test]
    fn strip_comment_requires_leading_space_or_line_start() {
        assert_eq!(strip_comment("foo: patch # note"), "foo: patch");
        assert_eq!(strip_comment("# whole line"), "");
        assert_eq!(strip_comment("foo#bar"), "foo#bar");
        assert_eq!(strip_comment("   "), "");
    }

    #[test]
    fn parse_entry_line_accepts_quoted_and_bare_names() {
        assert_eq!(
            parse_entry_line("\"a-1\": major").expect("valid"),
            Some(("a-1".to_string(), BumpType::Major))
        );
        assert_eq!(
            parse_entry_line("a-1:patch").expect("valid"),
            Some(("a-1".to_string(), BumpType::Patch))
        );
        assert_eq!(parse_entry_line("").expect("valid"), None);
        assert!(parse_entry_line("-leading-dash: patch").is_err());
    }

    #[test]
    fn split_front_matter_allows_body_on_closing_line() {
        let (front, body) = split_front_matter("---\nfoo: patch\n---body").expect("should split");
        assert_eq!(front, "foo: patch");
        assert_eq!(body, "body");
    }

    #[test]
    fn scan_entries_skips_malformed_lines() {
        let content = "---\nfoo: minor\nnot valid\nbar: patch\n---\n";

        let entries = scan_entries(content);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries["foo"], BumpType::Minor);
        assert_eq!(entries["bar"], BumpType::Patch);
    }

    #[test]
    fn scan_entries_without_front_matter_is_empty() {
        assert!(scan_entries("just text").is_empty());
    }
}
