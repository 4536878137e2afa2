mod changelog_writer;
mod changeset_io;
mod git_provider;
mod manifest_writer;
mod project_provider;

pub use changelog_writer::ChangelogWriter;
pub use changeset_io::{ChangesetReader, ChangesetWriter};
pub use git_provider::GitProvider;
pub use manifest_writer::ManifestWriter;
pub use project_provider::ProjectProvider;
