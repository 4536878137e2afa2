use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

const GITHUB_HOST: &str = "github.com";

static SSH_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^git@github\.com:([^/]+)/([^/]+?)(?:\.git)?$")
        .expect("ssh remote pattern is valid")
});

/// A GitHub `owner/repo` pair used to build pull request and commit links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    #[must_use]
    pub fn pull_url(&self, number: u64) -> String {
        format!("https://{GITHUB_HOST}/{self}/pull/{number}")
    }

    #[must_use]
    pub fn commit_url(&self, sha: &str) -> String {
        format!("https://{GITHUB_HOST}/{self}/commit/{sha}")
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Derives the slug from a remote URL.
///
/// Accepts `git@github.com:owner/repo(.git)` and
/// `http(s)://github.com/owner/repo(.git)`. Any other host or shape yields
/// `None`.
#[must_use]
pub fn parse_repo_slug(remote: &str) -> Option<RepoSlug> {
    let remote = remote.trim();

    if let Some(captures) = SSH_REMOTE.captures(remote) {
        return Some(RepoSlug::new(&captures[1], &captures[2]));
    }

    let url = Url::parse(remote).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    if !url
        .host_str()
        .is_some_and(|host| host.eq_ignore_ascii_case(GITHUB_HOST))
    {
        return None;
    }
    if !url.username().is_empty() || url.port().is_some() {
        return None;
    }
    if url.query().is_some() || url.fragment().is_some() {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.collect();
    let [owner, repo] = segments.as_slice() else {
        return None;
    };
    let repo = repo.strip_suffix(".git").unwrap_or(*repo);
    if owner.is_empty() || repo.is_empty() {
        return None;
    }

    Some(RepoSlug::new(*owner, repo))
}
