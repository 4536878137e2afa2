use changeset_core::BumpType;
use semver::Version;

use crate::entry::{GroupedNotes, GroupedRootNotes, NoteEntry, RootReleaseEntry};
use crate::forge::RepoSlug;
use crate::notes::{normalize_body, split_title_and_body};

const SHORT_SHA_LEN: usize = 7;

/// Markdown depth of the bump headings emitted by the per-skill renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H3,
    H4,
}

impl HeadingLevel {
    fn hashes(self) -> &'static str {
        match self {
            Self::H3 => "###",
            Self::H4 => "####",
        }
    }
}

fn short_sha(sha: &str) -> &str {
    sha.char_indices()
        .nth(SHORT_SHA_LEN)
        .map_or(sha, |(idx, _)| &sha[..idx])
}

fn format_provenance(entry: &NoteEntry, slug: Option<&RepoSlug>) -> String {
    let mut parts = Vec::new();

    if let Some(number) = entry.pr_number {
        parts.push(match slug {
            Some(slug) => format!("[#{number}]({})", slug.pull_url(number)),
            None => format!("#{number}"),
        });
    }

    if let Some(sha) = entry.commit_sha.as_deref() {
        let short = short_sha(sha);
        parts.push(match slug {
            Some(slug) => format!("[`{short}`]({})", slug.commit_url(sha)),
            None => format!("`{short}`"),
        });
    }

    if let Some(login) = entry.author_login.as_deref() {
        parts.push(format!("Thanks [@{login}](https://github.com/{login})!"));
    }

    parts.join(" ")
}

/// Renders one note as a bullet, prefixed with whatever provenance is known.
///
/// The first body line becomes the bullet text. Remaining lines follow after a
/// blank line, indented by two spaces.
#[must_use]
pub fn render_entry(entry: &NoteEntry, slug: Option<&RepoSlug>) -> Vec<String> {
    let mut lines = entry.body.split('\n');
    let first = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.collect();

    let provenance = format_provenance(entry, slug);
    let prefix = if provenance.is_empty() {
        String::new()
    } else {
        format!("{provenance} - ")
    };

    let mut output = vec![format!("- {prefix}{first}")];
    if !rest.is_empty() {
        output.push(String::new());
        output.extend(rest.into_iter().map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        }));
    }

    output
}

/// Renders per-skill notes grouped under `major`, `minor` and `patch` headings.
///
/// Notes that are empty after normalization are dropped, and buckets left
/// without notes emit no heading at all.
#[must_use]
pub fn render_grouped_notes(
    notes: &GroupedNotes,
    slug: Option<&RepoSlug>,
    level: HeadingLevel,
) -> String {
    let mut output: Vec<String> = Vec::new();

    for (bump, entries) in notes.iter_descending() {
        let normalized: Vec<NoteEntry> = entries
            .iter()
            .map(|entry| NoteEntry {
                body: normalize_body(&entry.body),
                ..entry.clone()
            })
            .filter(|entry| !entry.body.is_empty())
            .collect();

        if normalized.is_empty() {
            continue;
        }

        output.push(format!("{} {}", level.hashes(), bump.as_str()));
        output.push(String::new());

        for (index, entry) in normalized.iter().enumerate() {
            output.extend(render_entry(entry, slug));
            if index + 1 < normalized.len() {
                output.push(String::new());
            }
        }

        output.push(String::new());
    }

    output.join("\n")
}

fn format_title_link(title: &str, pr_number: Option<u64>, slug: Option<&RepoSlug>) -> String {
    match (pr_number, slug) {
        (Some(number), Some(slug)) => format!("[{title} #{number}]({})", slug.pull_url(number)),
        (Some(number), None) => format!("{title} #{number}"),
        (None, _) => title.to_string(),
    }
}

fn format_commit_link(sha: Option<&str>, slug: Option<&RepoSlug>) -> String {
    let Some(sha) = sha else {
        return "n/a".to_string();
    };

    let short = short_sha(sha);
    match slug {
        Some(slug) => format!("[{short}]({})", slug.commit_url(sha)),
        None => short.to_string(),
    }
}

fn resolved_pr_title(entry: &RootReleaseEntry) -> Option<&str> {
    entry
        .pr_title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
}

fn render_root_header(entry: &RootReleaseEntry, slug: Option<&RepoSlug>) -> String {
    let fallback = split_title_and_body(&entry.body).title;
    let title = resolved_pr_title(entry).unwrap_or(&fallback);

    let mut lines = vec![
        format!("🎯 {}", format_title_link(title, entry.pr_number, slug)),
        format!(
            "🗂️ {}",
            format_commit_link(entry.commit_sha.as_deref(), slug)
        ),
    ];
    lines.extend(entry.packages.iter().map(|package| format!("📦 {package}")));

    format!("__{}__", lines.join("<br/>\n"))
}

fn render_root_body(entry: &RootReleaseEntry) -> Vec<String> {
    let parts = split_title_and_body(&entry.body);

    let body = match resolved_pr_title(entry) {
        Some(pr_title) if pr_title != parts.title => normalize_body(&entry.body),
        _ => parts.body,
    };

    body.split('\n').map(str::to_string).collect()
}

/// Renders root changelog notes with one emphasized block per changeset.
///
/// A `---` separator appears only between entries of the same bucket.
#[must_use]
pub fn render_root_release_notes(notes: &GroupedRootNotes, slug: Option<&RepoSlug>) -> String {
    let mut output: Vec<String> = Vec::new();

    for (bump, entries) in notes.iter_descending() {
        if entries.is_empty() {
            continue;
        }

        output.push(format!("### {}", bump.heading_label()));
        output.push(String::new());

        for (index, entry) in entries.iter().enumerate() {
            output.push(render_root_header(entry, slug));
            output.push(String::new());
            output.extend(render_root_body(entry));

            if index + 1 < entries.len() {
                output.extend([String::new(), "---".to_string(), String::new()]);
            }
        }

        output.push(String::new());
    }

    output.join("\n")
}

/// Heading of one skill section in the release manifest, `name@version`.
#[must_use]
pub fn format_skill_section_heading(name: &str, version: &Version) -> String {
    format!("{name}@{version}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ByBump;

    const SHA: &str = "d473723c0ffee0123456789abcdef0123456789a";

    fn slug() -> RepoSlug {
        RepoSlug::new("acme", "skills")
    }

    fn note(body: &str) -> NoteEntry {
        NoteEntry {
            body: body.to_string(),
            ..NoteEntry::default()
        }
    }

    fn root_entry(bump: BumpType, body: &str, packages: &[&str]) -> RootReleaseEntry {
        RootReleaseEntry {
            bump_type: bump,
            body: body.to_string(),
            pr_number: None,
            pr_title: None,
            commit_sha: None,
            packages: packages.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn entry_without_provenance_is_plain_bullet() {
        let rendered = render_entry(&note("Adds X."), None);

        assert_eq!(rendered, ["- Adds X."]);
    }

    #[test]
    fn entry_with_full_provenance_and_slug() {
        let entry = NoteEntry {
            body: "Adds X.".to_string(),
            pr_number: Some(10),
            commit_sha: Some(SHA.to_string()),
            author_login: Some("octocat".to_string()),
        };

        let rendered = render_entry(&entry, Some(&slug()));

        assert_eq!(
            rendered,
            [format!(
                "- [#10](https://github.com/acme/skills/pull/10) \
                 [`d473723`](https://github.com/acme/skills/commit/{SHA}) \
                 Thanks [@octocat](https://github.com/octocat)! - Adds X."
            )]
        );
    }

    #[test]
    fn entry_without_slug_uses_bare_references() {
        let entry = NoteEntry {
            body: "Fix.".to_string(),
            pr_number: Some(7),
            commit_sha: Some(SHA.to_string()),
            author_login: None,
        };

        assert_eq!(render_entry(&entry, None), ["- #7 `d473723` - Fix."]);
    }

    #[test]
    fn entry_indents_remaining_lines() {
        let rendered = render_entry(&note("Title\n\n- detail one\n- detail two"), None);

        assert_eq!(
            rendered,
            ["- Title", "", "", "  - detail one", "  - detail two"]
        );
    }

    #[test]
    fn grouped_notes_render_in_descending_order() {
        let mut grouped = ByBump::new();
        grouped.push(BumpType::Patch, note("Fix typo."));
        grouped.push(BumpType::Major, note("### major\n\nBreak API."));

        let rendered = render_grouped_notes(&grouped, None, HeadingLevel::H3);

        assert_eq!(
            rendered,
            "### major\n\n- Break API.\n\n### patch\n\n- Fix typo.\n"
        );
    }

    #[test]
    fn grouped_notes_separate_entries_in_same_bucket() {
        let mut grouped = ByBump::new();
        grouped.push(BumpType::Minor, note("First."));
        grouped.push(BumpType::Minor, note("Second."));

        let rendered = render_grouped_notes(&grouped, None, HeadingLevel::H4);

        assert_eq!(rendered, "#### minor\n\n- First.\n\n- Second.\n");
    }

    #[test]
    fn grouped_notes_skip_buckets_with_only_empty_notes() {
        let mut grouped = ByBump::new();
        grouped.push(BumpType::Major, note("### major\n"));
        grouped.push(BumpType::Patch, note("Fix."));

        let rendered = render_grouped_notes(&grouped, None, HeadingLevel::H3);

        assert!(!rendered.contains("major"));
        assert!(rendered.starts_with("### patch"));
    }

    #[test]
    fn root_single_entry_has_no_separator() {
        let mut grouped = ByBump::new();
        grouped.push(
            BumpType::Minor,
            RootReleaseEntry {
                pr_number: Some(10),
                commit_sha: Some(SHA.to_string()),
                ..root_entry(BumpType::Minor, "Adds X.", &["a@0.1.0", "b@0.2.0"])
            },
        );

        let rendered = render_root_release_notes(&grouped, None);

        assert_eq!(rendered.matches("### Minor").count(), 1);
        assert_eq!(rendered.matches("🎯").count(), 1);
        assert_eq!(rendered.matches("📦").count(), 2);
        assert!(!rendered.contains("---"));
        assert_eq!(
            rendered,
            "### Minor\n\n\
             __🎯 Adds X. #10<br/>\n🗂️ d473723<br/>\n📦 a@0.1.0<br/>\n📦 b@0.2.0__\n\n\
             - Adds X.\n"
        );
    }

    #[test]
    fn root_separator_only_between_entries() {
        let mut grouped = ByBump::new();
        grouped.push(BumpType::Patch, root_entry(BumpType::Patch, "One.", &["a@1.0.1"]));
        grouped.push(BumpType::Patch, root_entry(BumpType::Patch, "Two.", &["b@1.0.1"]));
        grouped.push(BumpType::Patch, root_entry(BumpType::Patch, "Three.", &["c@1.0.1"]));

        let rendered = render_root_release_notes(&grouped, None);

        assert_eq!(rendered.matches("\n---\n").count(), 2);
        assert!(!rendered.trim_end().ends_with("---"));
    }

    #[test]
    fn root_header_links_title_and_commit_with_slug() {
        let mut grouped = ByBump::new();
        grouped.push(
            BumpType::Major,
            RootReleaseEntry {
                pr_number: Some(3),
                pr_title: Some("Rework everything".to_string()),
                commit_sha: Some(SHA.to_string()),
                ..root_entry(BumpType::Major, "Rework everything", &["a@2.0.0"])
            },
        );

        let rendered = render_root_release_notes(&grouped, Some(&slug()));

        assert!(rendered.contains(
            "__🎯 [Rework everything #3](https://github.com/acme/skills/pull/3)<br/>"
        ));
        assert!(rendered.contains(&format!(
            "🗂️ [d473723](https://github.com/acme/skills/commit/{SHA})<br/>"
        )));
    }

    #[test]
    fn root_header_without_commit_shows_placeholder() {
        let mut grouped = ByBump::new();
        grouped.push(BumpType::Patch, root_entry(BumpType::Patch, "Fix.", &["a@1.0.1"]));

        let rendered = render_root_release_notes(&grouped, None);

        assert!(rendered.contains("🗂️ n/a<br/>"));
    }

    #[test]
    fn root_body_keeps_full_note_when_pr_title_differs() {
        let mut grouped = ByBump::new();
        grouped.push(
            BumpType::Minor,
            RootReleaseEntry {
                pr_title: Some("Add metadata tags".to_string()),
                ..root_entry(
                    BumpType::Minor,
                    "Scope delivered:\n- Added tags.",
                    &["a@0.2.0"],
                )
            },
        );

        let rendered = render_root_release_notes(&grouped, None);

        assert!(rendered.contains("__🎯 Add metadata tags<br/>"));
        assert!(rendered.contains("\n\nScope delivered:\n- Added tags.\n"));
    }

    #[test]
    fn root_body_uses_rest_when_title_matches() {
        let mut grouped = ByBump::new();
        grouped.push(
            BumpType::Minor,
            RootReleaseEntry {
                pr_title: Some("Scope delivered".to_string()),
                ..root_entry(
                    BumpType::Minor,
                    "Scope delivered:\n- Added tags.",
                    &["a@0.2.0"],
                )
            },
        );

        let rendered = render_root_release_notes(&grouped, None);

        assert!(rendered.ends_with("a@0.2.0__\n\n- Added tags.\n"));
    }

    #[test]
    fn skill_section_heading() {
        let version = Version::new(1, 2, 3);

        assert_eq!(format_skill_section_heading("foo", &version), "foo@1.2.3");
    }
}
