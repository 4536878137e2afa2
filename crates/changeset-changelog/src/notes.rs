use std::sync::LazyLock;

use regex::Regex;

pub const FALLBACK_TITLE: &str = "Release note";

static BUMP_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^###\s*(major|minor|patch)\s*\n+").expect("bump heading pattern is valid")
});

/// Trims a note and drops one leading `### major|minor|patch` heading.
///
/// Contributors sometimes echo the bump level into the body; grouping already
/// carries it, so it must not render twice.
#[must_use]
pub fn normalize_body(note: &str) -> String {
    let trimmed = note.trim();
    BUMP_HEADING.replace(trimmed, "").trim().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteParts {
    pub title: String,
    pub body: String,
}

/// Splits a note into a headline and the remaining detail.
///
/// The headline is the first non-blank line without a trailing colon. Blank
/// lines around the detail are dropped; its indentation is kept. When no
/// detail remains, the body becomes a single bullet repeating the headline.
#[must_use]
pub fn split_title_and_body(note: &str) -> NoteParts {
    let normalized = normalize_body(note);
    let mut lines = normalized.lines();

    let first = lines
        .by_ref()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();

    let title = first.trim_end_matches(':').trim_end();
    let title = if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title.to_string()
    };

    let rest = lines
        .skip_while(|line| line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let rest = rest.trim_end();
    let body = if rest.is_empty() {
        format!("- {title}")
    } else {
        rest.to_string()
    };

    NoteParts { title, body }
}
