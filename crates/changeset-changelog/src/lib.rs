mod changelog;
mod entry;
mod error;
mod forge;
mod format;
mod notes;

pub use changelog::{Changelog, ROOT_CHANGELOG_PREAMBLE, latest_release_body};
pub use entry::{ByBump, GroupedNotes, GroupedRootNotes, NoteEntry, RootReleaseEntry};
pub use error::ChangelogError;
pub use forge::{RepoSlug, parse_repo_slug};
pub use format::{
    HeadingLevel, format_skill_section_heading, render_entry, render_grouped_notes,
    render_root_release_notes,
};
pub use notes::{FALLBACK_TITLE, NoteParts, normalize_body, split_title_and_body};

pub type Result<T> = std::result::Result<T, ChangelogError>;
