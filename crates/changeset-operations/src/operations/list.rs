use std::path::{Path, PathBuf};

use changeset_core::BumpType;
use changeset_parse::{extract_summary, scan_entries};
use indexmap::IndexMap;

use crate::Result;
use crate::traits::{ChangesetReader, ProjectProvider};

/// A pending changeset as shown to humans. Malformed entry lines are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetSummary {
    pub path: PathBuf,
    pub entries: IndexMap<String, BumpType>,
    pub summary: String,
}

pub struct ListOperation<P, R> {
    project_provider: P,
    changeset_reader: R,
}

impl<P, R> ListOperation<P, R>
where
    P: ProjectProvider,
    R: ChangesetReader,
{
    pub fn new(project_provider: P, changeset_reader: R) -> Self {
        Self {
            project_provider,
            changeset_reader,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the changeset directory or a changeset file cannot be read.
    pub fn execute(&self, repo_root: &Path) -> Result<Vec<ChangesetSummary>> {
        let repo = self.project_provider.open_repository(repo_root)?;

        self.changeset_reader
            .list_changesets(&repo)?
            .into_iter()
            .map(|path| {
                let content = self.changeset_reader.read_content(&path)?;
                Ok(ChangesetSummary {
                    entries: scan_entries(&content),
                    summary: extract_summary(&content),
                    path,
                })
            })
            .collect()
    }
}
