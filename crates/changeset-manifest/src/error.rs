use std::path::PathBuf;

use changeset_version::VersionError;
use thiserror::Error;

/// Shape violations in a skill metadata document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("skill document is missing the required metadata block")]
    MissingMetadataBlock,

    #[error("skill document is missing metadata.version")]
    MissingMetadataVersion,

    #[error(transparent)]
    InvalidVersion(#[from] VersionError),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid skill metadata in '{path}'")]
    Metadata {
        path: PathBuf,
        #[source]
        source: MetadataError,
    },

    #[error("failed to parse JSON at '{path}'")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing required field '{field}' in '{path}'")]
    MissingField { path: PathBuf, field: String },

    #[error("invalid version string '{version}' in '{path}'")]
    InvalidVersion {
        path: PathBuf,
        version: String,
        #[source]
        source: VersionError,
    },

    #[error("release manifest is missing its frontmatter block")]
    MissingReleaseFrontMatter,

    #[error("failed to parse release manifest frontmatter")]
    ReleaseFrontMatter(#[source] serde_yml::Error),
}
