//! Attribution for a changeset, recovered from the commit that added it.

use std::path::Path;
use std::sync::LazyLock;

use changeset_git::CommitInfo;
use regex::Regex;

use crate::traits::GitProvider;

static PR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(#(\d+)\)|#(\d+)").expect("pull request reference pattern is valid")
});

static DEFAULT_MERGE_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Merge pull request #\d+").expect("merge subject pattern is valid")
});

static TRAILING_PR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\(#\d+\)\s*$").expect("trailing reference pattern is valid")
});

static NOREPLY_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d+\+)?([^@]+)@users\.noreply\.github\.com$")
        .expect("noreply email pattern is valid")
});

/// Where a changeset came from. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangesetProvenance {
    pub pr_number: Option<u64>,
    pub pr_title: Option<String>,
    pub commit_sha: Option<String>,
    pub author_login: Option<String>,
}

impl ChangesetProvenance {
    #[must_use]
    pub fn from_commit(commit: &CommitInfo) -> Self {
        let pr_number = parse_pr_number(&commit.subject);
        let commit_sha = Some(commit.sha.trim())
            .filter(|sha| !sha.is_empty())
            .map(str::to_string);

        Self {
            pr_number,
            pr_title: pr_title_from_subject(&commit.subject, pr_number),
            commit_sha,
            author_login: login_from_email(&commit.author_email),
        }
    }

    /// Looks up the commit that added `path`.
    ///
    /// Missing history or any git failure yields an empty provenance.
    pub fn resolve<G: GitProvider>(git: &G, repo_root: &Path, path: &Path) -> Self {
        match git.introducing_commit(repo_root, path) {
            Ok(Some(commit)) => Self::from_commit(&commit),
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no commit adds changeset");
                Self::default()
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "provenance unavailable");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// First `(#123)` or `#123` reference in a commit subject.
#[must_use]
pub fn parse_pr_number(subject: &str) -> Option<u64> {
    let captures = PR_REFERENCE.captures(subject)?;
    let digits = captures.get(1).or_else(|| captures.get(2))?;
    digits.as_str().parse().ok()
}

/// The subject with its trailing `(#123)` removed.
///
/// Default merge subjects carry no authored title, and a subject without a PR
/// reference is not a PR title at all.
#[must_use]
pub fn pr_title_from_subject(subject: &str, pr_number: Option<u64>) -> Option<String> {
    let subject = subject.trim();
    if subject.is_empty() || pr_number.is_none() || DEFAULT_MERGE_SUBJECT.is_match(subject) {
        return None;
    }

    let title = TRAILING_PR_REFERENCE.replace(subject, "");
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// GitHub login from a `{id+}login@users.noreply.github.com` address.
#[must_use]
pub fn login_from_email(email: &str) -> Option<String> {
    NOREPLY_EMAIL
        .captures(email.trim())
        .and_then(|captures| captures.get(1))
        .map(|login| login.as_str().to_string())
}
