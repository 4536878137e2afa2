mod config;
mod error;
mod mapping;
mod project;

pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub use config::{RepositoryConfig, load_repository_config, parse_repository_config};
pub use error::ProjectError;
pub use mapping::{ChangedContext, collect_changed_context};
pub use project::{SkillRepository, discover_skills, list_changeset_files};

pub type Result<T> = std::result::Result<T, ProjectError>;
