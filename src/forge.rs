use crate::{build::CommitSha, error::RemoteApiError, repository::RepositoryName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    Pending,
    Success,
    Failure,
    Error,
}

/// One commit status, built fresh for each (build, repository) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub sha: CommitSha,
    pub state: StatusState,
    pub target_url: Option<String>,
    pub description: Option<String>,
    pub context: Option<String>,
}

/// A live, authenticated handle to one remote repository.
pub trait Forge: Send + Sync {
    /// Web URL of the repository, used in build log lines.
    fn url(&self) -> &str;

    /// Creates the status, or replaces the one with the same context.
    fn set_commit_status(&self, report: &StatusReport) -> Result<(), RemoteApiError>;
}

pub trait RepositoryResolver: Send + Sync {
    /// Every handle reachable with the configured credentials, possibly none.
    fn resolve(&self, name: &RepositoryName) -> Vec<Box<dyn Forge>>;
}
