use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git operation failed")]
    Git(#[from] git2::Error),

    #[error("not a git repository: '{path}'")]
    NotARepository { path: PathBuf },

    #[error("failed to resolve reference '{refspec}'")]
    RefNotFound { refspec: String },

    #[error("no common ancestor between '{base}' and '{head}'")]
    NoMergeBase { base: String, head: String },

    #[error("file '{path}' at '{refspec}' is not valid UTF-8")]
    NonUtf8Content { refspec: String, path: String },

    #[error("diff delta has no file path")]
    MissingDeltaPath,
}
