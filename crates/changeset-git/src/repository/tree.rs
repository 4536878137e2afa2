use std::path::Path;

use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// Reads a repo-relative file as it exists at `refspec`.
    ///
    /// Returns `Ok(None)` when the path does not exist at that ref or is not a
    /// regular file.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if the ref cannot be resolved and
    /// [`GitError::NonUtf8Content`] if the file is not UTF-8.
    pub fn file_at_ref(&self, refspec: &str, path: &str) -> Result<Option<String>> {
        let tree = self.resolve_tree(refspec)?;

        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(err) if err.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let object = entry.to_object(&self.inner)?;
        let Some(blob) = object.as_blob() else {
            return Ok(None);
        };

        let content =
            std::str::from_utf8(blob.content()).map_err(|_| GitError::NonUtf8Content {
                refspec: refspec.to_string(),
                path: path.to_string(),
            })?;

        Ok(Some(content.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if the ref cannot be resolved.
    pub fn path_exists_at_ref(&self, refspec: &str, path: &str) -> Result<bool> {
        let tree = self.resolve_tree(refspec)?;

        match tree.get_path(Path::new(path)) {
            Ok(_) => Ok(true),
            Err(err) if err.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
