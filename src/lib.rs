//! Reports the outcome of a finished build as a commit status on GitHub.
//!
//! The [`notifier::NotifierStep`] runs once per build, after its result is
//! final. It reads the checked-out SHA from the build's SCM data, resolves
//! every repository named by the push trigger and sets one status per
//! resolved repository.

pub mod build;
pub mod catalog;
pub mod classify;
pub mod credentials;
pub mod error;
pub mod forge;
pub mod git;
pub mod github;
pub mod message;
pub mod notifier;
pub mod repository;

pub use build::{Build, BuildLog, BuildResult, CommitReference, CommitSha};
pub use error::{NotifyError, RemoteApiError};
pub use forge::{Forge, RepositoryResolver, StatusReport, StatusState};
pub use notifier::{CommitNotifier, NotifierStep, StepState};
pub use repository::{PushTrigger, RepositoryName};
