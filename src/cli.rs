use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use commit_notifier::{BuildResult, RepositoryName, credentials::DEFAULT_API_URL};

#[derive(Parser, Debug)]
#[command(about = "Set the status of a finished build on its GitHub commit")]
pub struct Cli {
    #[arg(
        long = "build_number",
        value_name = "NUMBER",
        env = "COMMIT_NOTIFIER_BUILD_NUMBER",
        help = "Number of the finished build"
    )]
    pub build_number: u64,

    #[arg(
        long = "result",
        env = "COMMIT_NOTIFIER_RESULT",
        help = "Final result of the build",
        value_enum
    )]
    pub result: BuildResult,

    #[arg(
        long = "started_at",
        value_name = "RFC3339",
        env = "COMMIT_NOTIFIER_STARTED_AT",
        help = "Time the build started, e.g. 2024-05-01T12:00:00Z"
    )]
    pub started_at: DateTime<Utc>,

    #[arg(
        long = "build_url",
        value_name = "URL",
        env = "COMMIT_NOTIFIER_BUILD_URL",
        help = "Public URL of the build, linked from the commit status"
    )]
    pub build_url: String,

    #[arg(
        long = "checkout_path",
        value_name = "PATH",
        env = "COMMIT_NOTIFIER_CHECKOUT_PATH",
        default_value = ".",
        help = "Path of the working copy the build checked out"
    )]
    pub checkout_path: PathBuf,

    #[arg(
        long = "repository",
        value_name = "OWNER/NAME",
        env = "COMMIT_NOTIFIER_REPOSITORIES",
        value_delimiter = ',',
        help = "Repositories to notify. Defaults to the GitHub remotes of the checkout"
    )]
    pub repositories: Vec<RepositoryName>,

    #[arg(
        long = "context",
        value_name = "CONTEXT",
        env = "COMMIT_NOTIFIER_CONTEXT",
        help = "Status context, GitHub uses \"default\" when unset"
    )]
    pub context: Option<String>,

    #[arg(
        long = "api_url",
        value_name = "URL",
        env = "COMMIT_NOTIFIER_API_URL",
        default_value = DEFAULT_API_URL,
        help = "GitHub API endpoint used with --github_token"
    )]
    pub api_url: String,

    #[arg(
        long = "github_token",
        value_name = "TOKEN",
        env = "COMMIT_NOTIFIER_GITHUB_TOKEN",
        hide_env_values = true,
        help = "Personal access token for authentication"
    )]
    pub github_token: Option<String>,

    #[arg(
        long = "github_token_file",
        value_name = "PATH",
        env = "COMMIT_NOTIFIER_GITHUB_TOKEN_FILE",
        help = "Path to a file containing the personal access token for authentication"
    )]
    pub github_token_file: Option<PathBuf>,

    #[arg(
        long = "credentials_file",
        value_name = "PATH",
        env = "COMMIT_NOTIFIER_CREDENTIALS_FILE",
        help = "YAML file listing several GitHub accounts, used instead of --github_token"
    )]
    pub credentials_file: Option<PathBuf>,
}
