use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangelogError {
    #[error("failed to read changelog at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write changelog at '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("changelog must contain at least one H2 release heading")]
    NoReleaseHeadings,

    #[error("missing required release heading in changelog: ## v{version}")]
    MissingReleaseHeading { version: String },

    #[error("release heading ## v{version} exists but is not latest; latest is ## {latest}")]
    ReleaseNotLatest { version: String, latest: String },

    #[error("release heading ## v{version} has no notes")]
    EmptyRelease { version: String },
}
