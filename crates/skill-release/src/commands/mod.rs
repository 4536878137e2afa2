mod finalize;
mod list;
mod prepare;
mod validate_pr;

use std::path::Path;

use changeset_operations::verification::VersionPolicy;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Apply pending changesets: bump versions, write changelogs and the release manifest
    Prepare(PrepareArgs),
    /// Write release notes for the current package version and drop the release manifest
    Finalize,
    /// Check that a pull request's skill changes carry changesets and valid versions
    ValidatePr(ValidatePrArgs),
    /// Show pending changesets
    List,
}

#[derive(Args)]
pub(crate) struct PrepareArgs {
    /// Print the release plan without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Date for skill changelog headings, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub(crate) struct ValidatePrArgs {
    /// Branch the pull request targets; compared as `origin/<branch>`
    #[arg(long, env = "GITHUB_BASE_REF")]
    pub base: Option<String>,

    /// Version policy to enforce instead of the one implied by the pull request
    #[arg(long)]
    pub policy: Option<VersionPolicy>,
}

impl Commands {
    pub(crate) fn execute(self, repo_root: &Path) -> Result<()> {
        match self {
            Self::Prepare(args) => prepare::run(args, repo_root),
            Self::Finalize => finalize::run(repo_root),
            Self::ValidatePr(args) => validate_pr::run(args, repo_root),
            Self::List => list::run(repo_root),
        }
    }
}
