use crate::error::{Result, TaggerError};
use crate::github::TagLister;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Entry of the GitHub `GET /repos/{owner}/{repo}/tags` response
#[derive(Debug, Deserialize)]
struct GitHubTag {
    name: String,
}

/// Lists repository tags through the GitHub REST API
pub struct GitHubTagLister {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubTagLister {
    /// Create a lister against a custom API base URL
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("image-tagger/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(GitHubTagLister {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Authenticate requests with a token (raises the API rate limit)
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    fn tags_url(&self, repository: &str) -> String {
        format!("{}/repos/{}/tags", self.base_url, repository)
    }
}

impl TagLister for GitHubTagLister {
    fn list_tags(&self, repository: &str) -> Result<Vec<String>> {
        let url = self.tags_url(repository);
        debug!(%url, "listing tags");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(TaggerError::RepositoryNotFound(repository.to_string()));
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(TaggerError::remote(format!(
                "Unexpected status {} from {}",
                status, url
            )));
        }

        let tags: Vec<GitHubTag> = response.json().map_err(|e| {
            warn!("Failed to parse GitHub tags response: {}", e);
            TaggerError::remote(format!("Invalid tags response: {}", e))
        })?;

        Ok(tags.into_iter().map(|tag| tag.name).collect())
    }
}
