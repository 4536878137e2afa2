mod error;
mod parse;
mod summary;

pub use error::{FormatError, FrontMatterError, ValidationError};
pub use parse::{parse_changeset, parse_entry_line, scan_entries, split_front_matter, strip_comment};
pub use summary::{NO_DESCRIPTION, extract_summary};
