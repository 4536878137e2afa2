use std::path::Path;

use changeset_operations::operations::{ValidatePrInput, ValidatePrOperation, ValidatePrOutcome};
use changeset_operations::providers::{FileSystemProjectProvider, Git2Provider};

use super::ValidatePrArgs;
use crate::error::Result;
use crate::output::{PlainTextFormatter, ValidationFormatter};

const BASE_REMOTE: &str = "origin";

pub(crate) fn run(args: ValidatePrArgs, repo_root: &Path) -> Result<()> {
    let Some(base) = args.base.as_deref().map(str::trim).filter(|base| !base.is_empty()) else {
        println!("No GITHUB_BASE_REF detected. Skipping PR version/changeset checks.");
        return Ok(());
    };

    let base_ref = format!("{BASE_REMOTE}/{base}");
    println!("Comparing PR changes against {base_ref}");

    let operation = ValidatePrOperation::new(FileSystemProjectProvider::new(), Git2Provider::new());
    let input = ValidatePrInput {
        policy: args.policy,
        ..ValidatePrInput::new(base_ref)
    };

    let formatter = PlainTextFormatter;

    match operation.execute(repo_root, &input) {
        Ok(ValidatePrOutcome::NoChanges) => {
            println!("No changed files found in PR diff.");
            Ok(())
        }
        Ok(ValidatePrOutcome::NoSkillChanges { changed_file_count }) => {
            println!("No changed skill directories detected ({changed_file_count} file(s) changed).");
            Ok(())
        }
        Ok(ValidatePrOutcome::Passed(report)) => {
            print!("{}", formatter.format_success(&report));
            Ok(())
        }
        Err(error) => {
            if let Some(details) = formatter.format_failure(&error) {
                eprint!("{details}");
            }
            Err(error.into())
        }
    }
}
