use source_tree::TreeListing;

use crate::error::FetchError;

/// Configuration for one tree fetch: which repository and commit to list,
/// the credential to send, and an optional API base override (used by the
/// tests to point at a mock server, and by Actions runners that set
/// `GITHUB_API_URL`).
#[derive(Debug, Clone)]
pub struct GitHubTreeClientConfig {
    pub owner: String,
    pub repo: String,
    pub commit: String,
    pub token: Option<String>,
    pub api_base_url: Option<String>,
}

/// Fetches the recursive tree listing for a repository at a commit.
pub struct GitHubTreeClient {
    config: GitHubTreeClientConfig,
    client: reqwest::Client,
}

impl GitHubTreeClient {
    pub fn new(config: GitHubTreeClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn api_base(&self) -> &str {
        self.config
            .api_base_url
            .as_deref()
            .unwrap_or("https://api.github.com")
    }

    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .get(url)
            .header("User-Agent", "source-tree-fetcher")
            .header("Accept", "application/vnd.github.v3+json");

        if let Some(token) = &self.config.token {
            req = req.header("Authorization", format!("token {token}"));
        }

        req
    }

    /// Issue the single GET for the recursive listing. One attempt, no
    /// retries: every failure is classified into a [`FetchError`] variant
    /// rather than surfacing as a raw transport fault.
    pub async fn fetch_listing(&self) -> Result<TreeListing, FetchError> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base(),
            self.config.owner,
            self.config.repo,
            self.config.commit,
        );

        let response = self
            .build_request(&url)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_owned(),
            });
        }

        let body = response.text().await.map_err(|_| FetchError::NoResponse)?;

        serde_json::from_str(&body).map_err(|_| FetchError::UnrecognizedResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// A send error means either the server never answered (connection or
/// timeout trouble) or the request itself was unusable.
fn classify_send_error(error: reqwest::Error) -> FetchError {
    if error.is_connect() || error.is_timeout() {
        FetchError::NoResponse
    } else {
        FetchError::RequestSetup(error.to_string())
    }
}
