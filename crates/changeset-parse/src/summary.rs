use crate::parse::{normalize_line_endings, split_front_matter};

pub const NO_DESCRIPTION: &str = "(no description)";

/// First non-blank body line of a changeset, for one-line listings.
#[must_use]
pub fn extract_summary(content: &str) -> String {
    let content = normalize_line_endings(content);
    let body = split_front_matter(&content).map_or(content.as_ref(), |(_, body)| body);

    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(NO_DESCRIPTION)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_non_blank_body_line() {
        let content = "---\nfoo: patch\n---\n\n  Fix wording  \nMore detail\n";
        assert_eq!(extract_summary(content), "Fix wording");
    }

    #[test]
    fn empty_body_falls_back() {
        assert_eq!(extract_summary("---\nfoo: patch\n---\n\n"), NO_DESCRIPTION);
    }
}
