use std::path::Path;

use changeset_operations::operations::{ChangesetSummary, ListOperation};
use changeset_operations::providers::{FileSystemChangesetIO, FileSystemProjectProvider};

use crate::error::Result;
use crate::output::{display_path, rule};

pub(crate) fn run(repo_root: &Path) -> Result<()> {
    let operation = ListOperation::new(
        FileSystemProjectProvider::new(),
        FileSystemChangesetIO::new(repo_root),
    );
    let changesets = operation.execute(repo_root)?;

    if changesets.is_empty() {
        println!("No changesets found.");
        return Ok(());
    }

    println!("Found {} changeset file(s):\n", changesets.len());
    for changeset in &changesets {
        print_changeset(repo_root, changeset);
    }

    Ok(())
}

fn print_changeset(repo_root: &Path, changeset: &ChangesetSummary) {
    println!("{}", rule());
    println!("{}", display_path(repo_root, &changeset.path));
    println!("{}", rule());

    if changeset.entries.is_empty() {
        println!("entries: (none)");
    } else {
        for (skill, bump) in &changeset.entries {
            println!("- {skill}: {bump}");
        }
    }

    println!("summary: {}", changeset.summary);
    println!();
}
