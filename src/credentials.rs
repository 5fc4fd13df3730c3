use std::{fs::File, io::BufReader, path::{Path, PathBuf}};

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::repository::RepositoryName;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Credential {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub token: Option<String>,
    pub token_file: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct CredentialsConfig {
    pub credentials: Vec<Credential>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

impl Credential {
    pub fn new(api_url: &str, token: &str) -> Self {
        Credential {
            api_url: api_url.to_owned(),
            token: Some(token.to_owned()),
            token_file: None,
        }
    }

    /// Web host of the GitHub instance behind the API URL:
    /// `https://api.github.com` is `github.com`, an Enterprise
    /// `https://ghe.example.com/api/v3` is `ghe.example.com`. Any port is dropped.
    pub fn web_host(&self) -> String {
        let without_scheme = self
            .api_url
            .split_once("://")
            .map_or(self.api_url.as_str(), |(_, rest)| rest);
        let authority = without_scheme.split('/').next().unwrap_or_default();
        let host = authority.rsplit('@').next().unwrap_or(authority);
        let host = host.split(':').next().unwrap_or(host);
        host.strip_prefix("api.").unwrap_or(host).to_ascii_lowercase()
    }

    /// Whether this account lives on the host of `name`. Ports are ignored on
    /// both sides.
    pub fn serves(&self, name: &RepositoryName) -> bool {
        self.web_host() == name.host
    }

    pub fn token(&self) -> Result<String> {
        match (&self.token, &self.token_file) {
            (Some(token), _) => Ok(token.trim().to_owned()),
            (None, Some(path)) => {
                let token = std::fs::read_to_string(path).map_err(|e| {
                    anyhow!("Couldn't read token file {}: {}", path.display(), e)
                })?;
                Ok(token.trim().to_owned())
            }
            (None, None) => Err(anyhow!("No token configured for {}", self.api_url)),
        }
    }
}

pub fn read_credentials(path: &Path) -> Result<Vec<Credential>> {
    let file = File::open(path)
        .map_err(|_e| anyhow!("Couldn't open credentials file at {}", path.display()))?;
    let config: CredentialsConfig = serde_yaml_ng::from_reader(BufReader::new(file))?;
    Ok(config.credentials)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn derives_web_host_from_api_url() {
        let cases = [
            ("https://api.github.com", "github.com"),
            ("https://api.github.com/", "github.com"),
            ("https://GHE.example.com/api/v3", "ghe.example.com"),
            ("http://bot@ghe.internal:8443/api/v3", "ghe.internal"),
        ];
        for (api_url, host) in cases {
            assert_eq!(Credential::new(api_url, "t").web_host(), host);
        }
    }

    #[test]
    fn remotes_with_ports_match_their_host() {
        let github = Credential::new(DEFAULT_API_URL, "t");
        let enterprise = Credential::new("https://ghe.example.com:8443/api/v3", "t");

        for url in [
            "ssh://git@github.com:22/octo/hello.git",
            "https://github.com:443/octo/hello.git",
        ] {
            let name: RepositoryName = url.parse().unwrap();
            assert!(github.serves(&name), "{url}");
            assert!(!enterprise.serves(&name), "{url}");
        }

        let name: RepositoryName = "ssh://git@ghe.example.com:2222/octo/hello.git"
            .parse()
            .unwrap();
        assert!(enterprise.serves(&name));
        assert!(!github.serves(&name));
    }

    #[test]
    fn reads_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("ghe-token");
        std::fs::write(&token_path, "ghe-secret\n").unwrap();

        let config_path = dir.path().join("credentials.yaml");
        let mut file = File::create(&config_path).unwrap();
        writeln!(
            file,
            concat!(
                "credentials:\n",
                "  - token: gh-secret\n",
                "  - api_url: https://ghe.example.com/api/v3\n",
                "    token_file: {}",
            ),
            token_path.display()
        )
        .unwrap();

        let credentials = read_credentials(&config_path).unwrap();
        assert_eq!(credentials.len(), 2);
        assert_eq!(credentials[0].api_url, DEFAULT_API_URL);
        assert_eq!(credentials[0].token().unwrap(), "gh-secret");
        assert_eq!(credentials[1].web_host(), "ghe.example.com");
        assert_eq!(credentials[1].token().unwrap(), "ghe-secret");
    }

    #[test]
    fn missing_token_is_an_error() {
        let credential = Credential {
            api_url: DEFAULT_API_URL.to_owned(),
            token: None,
            token_file: None,
        };
        assert!(credential.token().is_err());
    }

    #[test]
    fn missing_file_names_path() {
        let err = read_credentials(Path::new("/nonexistent/credentials.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/credentials.yaml"));
    }
}
