use thiserror::Error;

use crate::build::CommitSha;

/// Errors that end a notifier step invocation. None of them alter the
/// build's own result.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("build #{build} has no recorded SCM revision to report against")]
    MissingData { build: u64 },

    #[error("build #{build} was not started by a GitHub push trigger")]
    Configuration { build: u64 },

    #[error("failed to set commit status on {repository} for {sha}: {source}")]
    RemoteApi {
        repository: String,
        sha: CommitSha,
        #[source]
        source: RemoteApiError,
    },

    #[error("the commit notifier already ran for this build")]
    AlreadyPerformed,
}

/// A rejected or failed create-status call.
#[derive(Debug, Error)]
pub enum RemoteApiError {
    #[error(transparent)]
    GitHub(#[from] octocrab::Error),

    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{0}' is not a full 40 character commit SHA")]
    InvalidSha(String),

    #[error("'{0}' is not a repository name or a GitHub remote URL")]
    InvalidRepository(String),
}
