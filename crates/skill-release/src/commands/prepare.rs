use std::path::Path;

use changeset_operations::operations::{PrepareInput, PrepareOperation, PrepareOutcome};
use changeset_operations::providers::{
    FileSystemChangelogWriter, FileSystemChangesetIO, FileSystemManifestWriter,
    FileSystemProjectProvider, Git2Provider,
};
use chrono::Local;

use super::PrepareArgs;
use crate::error::Result;
use crate::output::{display_path, print_plan};

pub(crate) fn run(args: PrepareArgs, repo_root: &Path) -> Result<()> {
    let operation = PrepareOperation::new(
        FileSystemProjectProvider::new(),
        Git2Provider::new(),
        FileSystemChangesetIO::new(repo_root),
        FileSystemManifestWriter::new(),
        FileSystemChangelogWriter::new(),
    );

    let input = PrepareInput {
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        dry_run: args.dry_run,
    };

    match operation.execute(repo_root, &input)? {
        PrepareOutcome::NoChangesets => {
            println!("No changeset files found. Nothing to prepare.");
        }
        PrepareOutcome::DryRun(plan) => {
            println!("Dry run: no files were changed.");
            print_plan(&plan);
        }
        PrepareOutcome::Prepared(output) => {
            for skill in &output.plan.skills {
                println!(
                    "Prepared {}: {} -> {} ({})",
                    skill.name, skill.current_version, skill.new_version, skill.bump
                );
            }
            println!(
                "Package version: {} -> {} ({})",
                output.plan.current_package_version,
                output.plan.new_package_version,
                output.plan.bump
            );
            for path in &output.written {
                println!("Wrote {}", display_path(repo_root, path));
            }
            for path in &output.removed_changesets {
                println!("Removed {}", display_path(repo_root, path));
            }
        }
    }

    Ok(())
}
