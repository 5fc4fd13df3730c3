use chrono::{DateTime, Utc};

use crate::{
    build::{Build, BuildLog},
    catalog::{self, StepDescriptor},
    classify::classify,
    error::NotifyError,
    forge::{RepositoryResolver, StatusReport},
    message::{compose, elapsed_since},
    repository::PushTrigger,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    NotRun,
    Running,
    Completed,
    Failed,
}

/// Configuration of the "set build status on GitHub commit" step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitNotifier {
    /// Status context; GitHub uses "default" when unset.
    pub context: Option<String>,
}

impl CommitNotifier {
    pub fn descriptor() -> &'static StepDescriptor {
        &catalog::COMMIT_NOTIFIER
    }
}

/// One invocation of the commit notifier for one finished build.
pub struct NotifierStep<'a> {
    config: CommitNotifier,
    resolver: &'a dyn RepositoryResolver,
    state: StepState,
}

impl<'a> NotifierStep<'a> {
    pub fn new(config: CommitNotifier, resolver: &'a dyn RepositoryResolver) -> Self {
        Self {
            config,
            resolver,
            state: StepState::NotRun,
        }
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    pub fn perform(
        &mut self,
        build: &Build,
        trigger: Option<&PushTrigger>,
        log: &mut dyn BuildLog,
    ) -> Result<(), NotifyError> {
        self.perform_at(build, trigger, log, Utc::now())
    }

    /// Runs the step as if the current time were `now`.
    pub fn perform_at(
        &mut self,
        build: &Build,
        trigger: Option<&PushTrigger>,
        log: &mut dyn BuildLog,
        now: DateTime<Utc>,
    ) -> Result<(), NotifyError> {
        if self.state != StepState::NotRun {
            return Err(NotifyError::AlreadyPerformed);
        }
        self.state = StepState::Running;
        tracing::debug!(build = build.number, "commit notifier running");

        let outcome = self.notify(build, trigger, log, now);

        self.state = match &outcome {
            Ok(()) => StepState::Completed,
            Err(err) => {
                log.println(&format!(
                    "{} failed: {}",
                    CommitNotifier::descriptor().display_name,
                    err
                ));
                StepState::Failed
            }
        };
        tracing::debug!(build = build.number, state = ?self.state, "commit notifier finished");

        outcome
    }

    fn notify(
        &self,
        build: &Build,
        trigger: Option<&PushTrigger>,
        log: &mut dyn BuildLog,
        now: DateTime<Utc>,
    ) -> Result<(), NotifyError> {
        let commit = build
            .scm
            .as_ref()
            .ok_or(NotifyError::MissingData { build: build.number })?;
        let trigger = trigger.ok_or(NotifyError::Configuration { build: build.number })?;

        for name in trigger.repositories() {
            let repositories = self.resolver.resolve(name);
            if repositories.is_empty() {
                log.println(&format!(
                    "No GitHub repository found for {name} with the configured credentials"
                ));
                continue;
            }

            for repository in repositories {
                let (state, verb) = classify(build.result);
                let elapsed = elapsed_since(build.started_at, now);
                let report = StatusReport {
                    sha: commit.sha.clone(),
                    state,
                    target_url: Some(build.url.clone()),
                    description: Some(compose(build.number, verb, elapsed)),
                    context: self.config.context.clone(),
                };

                log.println(&format!(
                    "Setting commit status on GitHub for {}/commit/{}",
                    repository.url(),
                    report.sha
                ));
                repository
                    .set_commit_status(&report)
                    .map_err(|source| NotifyError::RemoteApi {
                        repository: repository.url().to_owned(),
                        sha: report.sha.clone(),
                        source,
                    })?;
            }
        }

        Ok(())
    }
}
