use std::sync::Arc;

use anyhow::Result;
use octocrab::Octocrab;
use tokio::runtime::Runtime;

use crate::{
    credentials::Credential,
    error::RemoteApiError,
    forge::{Forge, RepositoryResolver, StatusReport, StatusState},
    repository::RepositoryName,
};

/// A repository on GitHub, reached through one credential.
pub struct GitHub {
    crab: Octocrab,
    runtime: Arc<Runtime>,
    owner: String,
    repo: String,
    url: String,
}

impl Forge for GitHub {
    fn url(&self) -> &str {
        &self.url
    }

    fn set_commit_status(&self, report: &StatusReport) -> Result<(), RemoteApiError> {
        let repo = self.crab.repos(&self.owner, &self.repo);
        let mut builder = repo.create_status(report.sha.to_string(), report.state.into());

        if let Some(desc) = &report.description {
            builder = builder.description(desc.clone());
        }

        if let Some(target_url) = &report.target_url {
            builder = builder.target(target_url.clone());
        }

        if let Some(context) = &report.context {
            builder = builder.context(context.clone());
        }

        self.runtime.block_on(async { builder.send().await })?;

        Ok(())
    }
}

struct Account {
    credential: Credential,
    crab: Octocrab,
}

/// Resolves repository names against every configured GitHub account.
pub struct GitHubResolver {
    runtime: Arc<Runtime>,
    accounts: Vec<Account>,
}

impl GitHubResolver {
    pub fn new(credentials: &[Credential]) -> Result<Self> {
        let runtime = Arc::new(
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()?,
        );
        let accounts = {
            let _guard = runtime.enter();
            credentials
                .iter()
                .map(|credential| -> Result<Account> {
                    let crab = Octocrab::builder()
                        .personal_token(credential.token()?)
                        .base_uri(credential.api_url.as_str())?
                        .build()?;
                    Ok(Account {
                        credential: credential.clone(),
                        crab,
                    })
                })
                .collect::<Result<Vec<_>>>()?
        };

        Ok(GitHubResolver { runtime, accounts })
    }
}

impl RepositoryResolver for GitHubResolver {
    fn resolve(&self, name: &RepositoryName) -> Vec<Box<dyn Forge>> {
        self.accounts
            .iter()
            .filter(|account| account.credential.serves(name))
            .filter_map(|account| {
                let lookup = self.runtime.block_on(async {
                    account.crab.repos(&name.owner, &name.name).get().await
                });
                match lookup {
                    Ok(repository) => {
                        let url = repository.html_url.map_or_else(
                            || format!("https://{}/{}", name.host, name.full_name()),
                            |url| url.to_string().trim_end_matches('/').to_owned(),
                        );
                        Some(Box::new(GitHub {
                            crab: account.crab.clone(),
                            runtime: self.runtime.clone(),
                            owner: name.owner.clone(),
                            repo: name.name.clone(),
                            url,
                        }) as Box<dyn Forge>)
                    }
                    Err(err) => {
                        tracing::warn!(
                            repository = %name,
                            api_url = %account.credential.api_url,
                            error = %err,
                            "failed to look up repository"
                        );
                        None
                    }
                }
            })
            .collect()
    }
}

impl From<StatusState> for octocrab::models::StatusState {
    fn from(status: StatusState) -> Self {
        match status {
            StatusState::Pending => Self::Pending,
            StatusState::Success => Self::Success,
            StatusState::Error => Self::Error,
            StatusState::Failure => Self::Failure,
        }
    }
}
