use std::time::Duration;

use anyhow::{Context, anyhow};
use log::debug;
use reqwest::{
    Client, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;
use thiserror::Error;

use crate::{ApiToken, RepositoryFetcher, Request, StdResult};

/// The REST production endpoint for GitHub.
pub const GITHUB_API_ENDPOINT: &str = "https://api.github.com";

/// The REST API version requested from GitHub.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

const GITHUB_API_VERSION_HEADER: &str = "x-github-api-version";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const USER_AGENT: &str = "repo-languages";

/// Fetcher error
#[derive(Error, Debug)]
pub enum FetcherError {
    /// Transport error (connection, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),
    /// Remote error
    #[error("Remote error: status {status} for {url}")]
    Status { status: u16, url: String },
    /// Parse error
    #[error("Parsing error: {0}")]
    Decode(String),
    /// The account cannot be used as a URL path segment
    #[error("Invalid account name: {0:?}")]
    InvalidAccount(String),
}

impl From<reqwest::Error> for FetcherError {
    fn from(error: reqwest::Error) -> Self {
        match error.is_decode() {
            true => FetcherError::Decode(error.to_string()),
            false => FetcherError::Transport(error.to_string()),
        }
    }
}

/// Fetches repository data from the GitHub REST API.
pub struct RestFetcher {
    client: Client,
    endpoint: Url,
}

impl RestFetcher {
    /// Creates a new `RestFetcher` instance for the given endpoint and credential.
    pub fn try_new(
        endpoint: &str,
        token: &ApiToken,
        api_version: &str,
        timeout: Duration,
    ) -> StdResult<Self> {
        let mut authorization =
            HeaderValue::from_str(&token.bearer()).with_context(|| "Invalid GitHub API token")?;
        authorization.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            HeaderName::from_static(GITHUB_API_VERSION_HEADER),
            HeaderValue::from_str(api_version)
                .with_context(|| format!("Invalid GitHub API version: {api_version}"))?,
        );
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .with_context(|| "Failed to build HTTP client")?;
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid GitHub API endpoint: {endpoint}"))?;
        if endpoint.cannot_be_a_base() {
            return Err(anyhow!("GitHub API endpoint cannot be a base URL: {endpoint}"));
        }

        Ok(Self { client, endpoint })
    }

    /// Builds `<endpoint>/users/<account>[/<suffix>]`, the account being a
    /// single percent-encoded path segment.
    fn account_url(&self, account: &str, suffix: Option<&str>) -> StdResult<Url> {
        if account.is_empty() || account == "." || account == ".." {
            return Err(FetcherError::InvalidAccount(account.to_string()).into());
        }
        let mut url = self.endpoint.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("GitHub API endpoint cannot be a base URL"))?;
            segments.pop_if_empty().push("users").push(account);
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }

        Ok(url)
    }

    async fn get_json(&self, url: Url, query: &[(&str, String)]) -> Result<Value, FetcherError> {
        debug!("GET {url} {query:?}");
        let response = self.client.get(url.clone()).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetcherError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait::async_trait]
impl RepositoryFetcher for RestFetcher {
    async fn fetch(&self, request: &Request) -> StdResult<Value> {
        let value = match request {
            Request::AccountMetadata(request) => {
                let url = self.account_url(&request.account, None)?;
                self.get_json(url, &[]).await?
            }
            Request::RepositoriesPage(request) => {
                let url = self.account_url(&request.account, Some("repos"))?;
                self.get_json(
                    url,
                    &[
                        ("per_page", request.per_page.to_string()),
                        ("page", request.page.to_string()),
                    ],
                )
                .await?
            }
        };

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::{AccountMetadataRequest, AccountName, RepositoriesPageRequest};

    use super::*;

    fn build_fetcher(server: &MockServer, timeout: Duration) -> RestFetcher {
        RestFetcher::try_new(
            &server.base_url(),
            &ApiToken::new("credentials"),
            GITHUB_API_VERSION,
            timeout,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_account_metadata() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/users/org-1")
                .header("authorization", "Bearer credentials")
                .header("x-github-api-version", GITHUB_API_VERSION)
                .header("accept", GITHUB_MEDIA_TYPE);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"login": "org-1", "public_repos": 150}));
        });
        let fetcher = build_fetcher(&server, Duration::from_secs(5));
        let request = Request::AccountMetadata(AccountMetadataRequest::new(&AccountName::new(
            "org-1",
        )));

        let value = fetcher.fetch(&request).await.unwrap();

        mock.assert();
        assert_eq!(json!({"login": "org-1", "public_repos": 150}), value);
    }

    #[tokio::test]
    async fn test_fetch_repositories_page() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/users/org-1/repos")
                .query_param("per_page", "100")
                .query_param("page", "2")
                .header("authorization", "Bearer credentials");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([
                    {"name": "repository-1", "language": "Rust"},
                    {"name": "repository-2", "language": null}
                ]));
        });
        let fetcher = build_fetcher(&server, Duration::from_secs(5));
        let request = Request::RepositoriesPage(RepositoriesPageRequest::new("org-1", 100, 2));

        let value = fetcher.fetch(&request).await.unwrap();

        mock.assert();
        assert_eq!(
            json!([
                {"name": "repository-1", "language": "Rust"},
                {"name": "repository-2", "language": null}
            ]),
            value
        );
    }

    #[tokio::test]
    async fn test_fetch_fails_on_error_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/users/dummy/repos");
            then.status(500);
        });
        let fetcher = build_fetcher(&server, Duration::from_secs(5));

        let error = fetcher
            .fetch(&Request::dummy_repositories_page(1))
            .await
            .expect_err("Expected a remote error");

        mock.assert();
        assert!(matches!(
            error.downcast_ref::<FetcherError>(),
            Some(FetcherError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_fails_on_invalid_json() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/users/dummy/repos");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("not json");
        });
        let fetcher = build_fetcher(&server, Duration::from_secs(5));

        let error = fetcher
            .fetch(&Request::dummy_repositories_page(1))
            .await
            .expect_err("Expected a parsing error");

        mock.assert();
        assert!(matches!(
            error.downcast_ref::<FetcherError>(),
            Some(FetcherError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_fails_on_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/users/dummy/repos");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!([]));
        });
        let fetcher = build_fetcher(&server, Duration::from_millis(50));

        let error = fetcher
            .fetch(&Request::dummy_repositories_page(1))
            .await
            .expect_err("Expected a timeout");

        assert!(matches!(
            error.downcast_ref::<FetcherError>(),
            Some(FetcherError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_keeps_account_within_users_path() {
        let server = MockServer::start();
        let other_resource = server.mock(|when, then| {
            when.method("GET").path("/orgs/x");
            then.status(200).json_body(json!({"public_repos": 7}));
        });
        let users = server.mock(|when, then| {
            when.method("GET").path_contains("/users/");
            then.status(200).json_body(json!({"public_repos": 1}));
        });
        let fetcher = build_fetcher(&server, Duration::from_secs(5));
        let request = Request::AccountMetadata(AccountMetadataRequest::new(&AccountName::new(
            "../orgs/x",
        )));

        let value = fetcher.fetch(&request).await.unwrap();

        users.assert();
        assert_eq!(0, other_resource.hits());
        assert_eq!(json!({"public_repos": 1}), value);
    }

    #[tokio::test]
    async fn test_fetch_encodes_reserved_characters_of_account() {
        let server = MockServer::start();
        let other_account = server.mock(|when, then| {
            when.method("GET").path("/users/a/repos");
            then.status(200).json_body(json!([{"name": "other"}]));
        });
        let users = server.mock(|when, then| {
            when.method("GET")
                .path_contains("/users/")
                .query_param("page", "1");
            then.status(200).json_body(json!([]));
        });
        let fetcher = build_fetcher(&server, Duration::from_secs(5));
        let request = Request::RepositoriesPage(RepositoriesPageRequest::new("a/repos?x=", 100, 1));

        let value = fetcher.fetch(&request).await.unwrap();

        users.assert();
        assert_eq!(0, other_account.hits());
        assert_eq!(json!([]), value);
    }

    #[test]
    fn test_account_url_encodes_account_as_single_segment() {
        let fetcher = RestFetcher::try_new(
            "https://api.example.com/api/v3/",
            &ApiToken::new("credentials"),
            GITHUB_API_VERSION,
            Duration::from_secs(5),
        )
        .unwrap();

        let url = fetcher.account_url("../orgs/x#y", Some("repos")).unwrap();

        assert_eq!(
            "https://api.example.com/api/v3/users/..%2Forgs%2Fx%23y/repos",
            url.as_str()
        );
    }

    #[test]
    fn test_account_url_rejects_dot_segments() {
        let fetcher = RestFetcher::try_new(
            GITHUB_API_ENDPOINT,
            &ApiToken::new("credentials"),
            GITHUB_API_VERSION,
            Duration::from_secs(5),
        )
        .unwrap();

        for account in ["", ".", ".."] {
            let error = fetcher
                .account_url(account, None)
                .expect_err("Expected an invalid account");

            assert!(matches!(
                error.downcast_ref::<FetcherError>(),
                Some(FetcherError::InvalidAccount(_))
            ));
        }
    }
}
