use std::path::Path;

use anyhow::Result;

use crate::{
    build::{CommitReference, CommitSha},
    repository::parse_remote_urls,
};

/// The working copy a build checked out.
pub struct GitCheckout {
    repo: git2::Repository,
}

impl GitCheckout {
    pub fn open(path: &Path) -> Result<Self, git2::Error> {
        let repo = git2::Repository::open(path)?;

        Ok(GitCheckout { repo })
    }

    pub fn current_commit(&self) -> Result<git2::Object<'_>, git2::Error> {
        self.repo.head()?.peel(git2::ObjectType::Commit)
    }

    /// URLs of all configured remotes, in the order git lists them.
    pub fn remote_urls(&self) -> Result<Vec<String>, git2::Error> {
        let names = self.repo.remotes()?;
        let mut urls = Vec::new();
        for name in names.iter().flatten() {
            if let Some(url) = self.repo.find_remote(name)?.url() {
                urls.push(url.to_owned());
            }
        }
        Ok(urls)
    }

    /// The full SHA of the checked-out revision plus the GitHub repositories
    /// its remotes point at.
    pub fn commit_reference(&self) -> Result<CommitReference> {
        let sha: CommitSha = self.current_commit()?.id().to_string().parse()?;
        let remotes = parse_remote_urls(self.remote_urls()?);

        Ok(CommitReference { sha, remotes })
    }
}

/// The revision recorded for a build's working copy. `None` when the path is
/// not a git checkout or has no commit, so the notifier can fail the step
/// itself.
pub fn recorded_commit(path: &Path) -> Option<CommitReference> {
    let reference = GitCheckout::open(path)
        .map_err(anyhow::Error::from)
        .and_then(|checkout| checkout.commit_reference());

    match reference {
        Ok(reference) => Some(reference),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "no revision checked out");
            None
        }
    }
}
