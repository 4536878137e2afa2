use crate::{Repository, Result};

const ORIGIN: &str = "origin";

impl Repository {
    /// URL of the `origin` remote, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote lookup fails.
    pub fn remote_url(&self) -> Result<Option<String>> {
        let Ok(remote) = self.inner.find_remote(ORIGIN) else {
            return Ok(None);
        };

        Ok(remote.url().map(String::from))
    }
}
