use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read config at '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to list directory '{path}'")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to search for skills below '{path}'")]
    SkillDiscovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("skill '{name}' is defined twice: '{first}' and '{second}'")]
    DuplicateSkill {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}
