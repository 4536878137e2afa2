use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontMatterError {
    #[error("invalid changeset format: missing frontmatter delimiters (---)")]
    MissingDelimiters,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid changeset entry line: {line}")]
    InvalidEntryLine { line: String },

    #[error("duplicate changeset entry for skill '{name}'")]
    DuplicateEntry { name: String },

    #[error("changeset must include at least one skill bump entry")]
    NoEntries,

    #[error("changeset body must describe the change")]
    EmptyBody,

    #[error("input exceeds maximum size of {max_bytes} bytes")]
    InputTooLarge { max_bytes: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
