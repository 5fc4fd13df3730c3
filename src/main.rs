mod cli;

use anyhow::{Result, anyhow};
use chrono::Utc;
use clap::Parser;
use commit_notifier::{
    Build, CommitNotifier, NotifierStep, PushTrigger,
    build::StdoutLog,
    credentials::{Credential, read_credentials},
    git::recorded_commit,
    github::GitHubResolver,
};
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let credentials = if let Some(path) = &cli.credentials_file {
        read_credentials(path)?
    } else {
        let token = if let Some(token_file) = &cli.github_token_file {
            let token = std::fs::read_to_string(token_file)?;
            token.trim().to_owned()
        } else {
            cli.github_token
                .clone()
                .ok_or_else(|| anyhow!("No GitHub token provided"))?
        };
        vec![Credential::new(&cli.api_url, &token)]
    };
    let resolver = GitHubResolver::new(&credentials)?;

    let scm = recorded_commit(&cli.checkout_path);
    let trigger = if cli.repositories.is_empty() {
        let remotes = scm.as_ref().map(|reference| reference.remotes.clone());
        PushTrigger::new(remotes.unwrap_or_default())
    } else {
        PushTrigger::new(cli.repositories.clone())
    };

    let build = Build {
        number: cli.build_number,
        result: cli.result,
        started_at: cli.started_at,
        finished_at: Some(Utc::now()),
        url: cli.build_url.clone(),
        scm,
    };

    let descriptor = CommitNotifier::descriptor();
    println!("{}", format!("{}...", descriptor.display_name).bold());

    let mut step = NotifierStep::new(
        CommitNotifier {
            context: cli.context.clone(),
        },
        &resolver,
    );
    match step.perform(&build, Some(&trigger), &mut StdoutLog) {
        Ok(()) => {
            println!("{}", "Commit status updated".bold().green());
            Ok(())
        }
        Err(err) => {
            println!(
                "{}",
                format!("Build #{} result stays {}", build.number, build.result)
                    .bold()
                    .red()
            );
            Err(err.into())
        }
    }
}
