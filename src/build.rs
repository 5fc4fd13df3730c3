use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::{error::ParseError, repository::RepositoryName};

/// Terminal result of a build, from best to worst.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum)]
pub enum BuildResult {
    Success,
    Unstable,
    Failure,
    Aborted,
    NotBuilt,
}

impl BuildResult {
    /// Rank in the total order of results. Lower is better.
    pub const fn ordinal(self) -> u8 {
        match self {
            BuildResult::Success => 0,
            BuildResult::Unstable => 1,
            BuildResult::Failure => 2,
            BuildResult::Aborted => 3,
            BuildResult::NotBuilt => 4,
        }
    }

    pub const fn is_better_or_equal_to(self, other: BuildResult) -> bool {
        self.ordinal() <= other.ordinal()
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildResult::Success => "SUCCESS",
            BuildResult::Unstable => "UNSTABLE",
            BuildResult::Failure => "FAILURE",
            BuildResult::Aborted => "ABORTED",
            BuildResult::NotBuilt => "NOT_BUILT",
        };
        f.write_str(name)
    }
}

/// A full, lowercase, 40 character commit SHA.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CommitSha {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 40 && s.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(CommitSha(s.to_ascii_lowercase()))
        } else {
            Err(ParseError::InvalidSha(s.to_owned()))
        }
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The revision a build checked out, as recorded by the SCM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReference {
    pub sha: CommitSha,
    pub remotes: Vec<RepositoryName>,
}

/// A finished build as seen by post-build steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    pub number: u64,
    pub result: BuildResult,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub url: String,
    /// `None` when the build never checked out code.
    pub scm: Option<CommitReference>,
}

/// Sink for lines shown in a build's console log.
pub trait BuildLog {
    fn println(&mut self, line: &str);
}

impl BuildLog for Vec<String> {
    fn println(&mut self, line: &str) {
        self.push(line.to_owned());
    }
}

pub struct StdoutLog;

impl BuildLog for StdoutLog {
    fn println(&mut self, line: &str) {
        println!("{line}");
    }
}
