use std::{fmt, str::FromStr, sync::LazyLock};

use itertools::{Either, Itertools};
use regex::Regex;

use crate::error::ParseError;

pub const DEFAULT_HOST: &str = "github.com";

static REMOTE_URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^git@([^:/]+):([^/]+)/([^/]+?)(?:\.git)?/?$",
        r"^https?://(?:[^/@]+@)?([^/:]+)(?::\d+)?/([^/]+)/([^/]+?)(?:\.git)?/?$",
        r"^git://([^/:]+)(?::\d+)?/([^/]+)/([^/]+?)(?:\.git)?/?$",
        r"^ssh://git@([^/:]+)(?::\d+)?/([^/]+)/([^/]+?)(?:\.git)?/?$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("remote URL pattern is valid"))
    .collect()
});

/// A repository on a GitHub host. Several remotes (ssh, https, ...) may name
/// the same repository, and one name may resolve to several remote handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryName {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RepositoryName {
    pub fn new(host: &str, owner: &str, name: &str) -> Self {
        RepositoryName {
            host: host.to_ascii_lowercase(),
            owner: owner.to_owned(),
            name: name.to_owned(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    fn from_remote_url(url: &str) -> Option<Self> {
        REMOTE_URL_PATTERNS.iter().find_map(|pattern| {
            let caps = pattern.captures(url)?;
            Some(RepositoryName::new(&caps[1], &caps[2], &caps[3]))
        })
    }
}

/// Accepts `owner/name`, `host/owner/name` or a git remote URL.
impl FromStr for RepositoryName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(name) = RepositoryName::from_remote_url(s) {
            return Ok(name);
        }

        let segments: Vec<&str> = s.split('/').collect();
        let valid = segments.iter().all(|seg| {
            !seg.is_empty() && !seg.contains(char::is_whitespace) && !seg.contains(':')
        });
        match segments.as_slice() {
            [owner, name] if valid => Ok(RepositoryName::new(DEFAULT_HOST, owner, name)),
            [host, owner, name] if valid => Ok(RepositoryName::new(host, owner, name)),
            _ => Err(ParseError::InvalidRepository(s.to_owned())),
        }
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.name)
    }
}

/// Trigger configuration of a project: the repositories whose pushes start a
/// build and which receive its commit status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushTrigger {
    repositories: Vec<RepositoryName>,
}

impl PushTrigger {
    pub fn new(repositories: Vec<RepositoryName>) -> Self {
        PushTrigger { repositories }
    }

    pub fn repositories(&self) -> &[RepositoryName] {
        &self.repositories
    }
}

/// Names of the GitHub repositories behind git remote URLs, in remote order.
/// Remotes that do not look like a GitHub repository are skipped.
pub fn parse_remote_urls<I, S>(urls: I) -> Vec<RepositoryName>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (repositories, skipped): (Vec<_>, Vec<_>) = urls.into_iter().partition_map(|url| {
        let url = url.as_ref();
        match url.parse::<RepositoryName>() {
            Ok(name) => Either::Left(name),
            Err(_) => Either::Right(url.to_owned()),
        }
    });

    for url in skipped {
        tracing::debug!(%url, "remote is not a GitHub repository, skipping");
    }

    repositories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octo_hello(host: &str) -> RepositoryName {
        RepositoryName::new(host, "octo", "hello")
    }

    #[test]
    fn parses_remote_url_schemes() {
        for url in [
            "git@github.com:octo/hello.git",
            "git@github.com:octo/hello",
            "https://github.com/octo/hello.git",
            "https://github.com/octo/hello",
            "https://ci-bot@github.com/octo/hello.git",
            "http://github.com/octo/hello/",
            "git://github.com/octo/hello.git",
            "ssh://git@github.com/octo/hello.git",
            "ssh://git@github.com:22/octo/hello.git",
            "https://github.com:443/octo/hello.git",
            "https://ci-bot@github.com:443/octo/hello",
            "git://github.com:9418/octo/hello.git",
        ] {
            assert_eq!(url.parse::<RepositoryName>(), Ok(octo_hello("github.com")), "{url}");
        }
    }

    #[test]
    fn parses_short_names() {
        assert_eq!("octo/hello".parse(), Ok(octo_hello("github.com")));
        assert_eq!(
            "GHE.example.com/octo/hello".parse(),
            Ok(octo_hello("ghe.example.com"))
        );
    }

    #[test]
    fn rejects_non_repositories() {
        for input in [
            "",
            "hello",
            "/tmp/repo",
            "a/b/c/d",
            "octo/ hello",
            "file:///srv/git/hello.git",
        ] {
            assert!(input.parse::<RepositoryName>().is_err(), "{input}");
        }
    }

    #[test]
    fn remote_urls_keep_order_and_duplicates() {
        let names = parse_remote_urls([
            "https://github.com/octo/hello.git",
            "/srv/mirror/hello.git",
            "git@github.com:octo/hello.git",
            "git@ghe.example.com:octo/hello.git",
        ]);

        assert_eq!(
            names,
            vec![
                octo_hello("github.com"),
                octo_hello("github.com"),
                octo_hello("ghe.example.com"),
            ]
        );
    }

    #[test]
    fn displays_host_and_full_name() {
        let name = octo_hello("github.com");
        assert_eq!(name.to_string(), "github.com/octo/hello");
        assert_eq!(name.full_name(), "octo/hello");
    }
}
