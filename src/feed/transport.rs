//! HTTP transport to the GitHub GraphQL endpoint
//!
//! The pagination driver only sees the [`Transport`] trait; the concrete
//! [`GithubTransport`] does one POST per page and hands back the raw status
//! and body for the page decoder. Retries and connection pooling stay inside
//! reqwest.

#[cfg(test)]
use mockall::automock;

use serde::Serialize;

use crate::feed::error::FeedError;

/// Default base URL for the GitHub API
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Validated API credential.
///
/// Rejects empty tokens at construction so a missing credential fails before
/// any network activity instead of surfacing as an authentication error later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: &str) -> Result<Self, FeedError> {
        if token.trim().is_empty() {
            return Err(FeedError::InvalidConfiguration(
                "API token must not be empty".to_string(),
            ));
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Request body sent to the GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
}

/// Raw response handed to the page decoder
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Trait for issuing one GraphQL request per advisory page
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Posts the query and returns the raw response, whatever its status.
    /// Only transport-level failures (connect, timeout) are errors here.
    async fn post(
        &self,
        token: &ApiToken,
        request: &GraphqlRequest,
    ) -> Result<RawResponse, FeedError>;
}

/// Transport implementation backed by reqwest
pub struct GithubTransport {
    client: reqwest::Client,
    base_url: String,
}

impl GithubTransport {
    /// Creates a transport pointed at a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("ghsa-feed")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }
}

impl Default for GithubTransport {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Transport for GithubTransport {
    async fn post(
        &self,
        token: &ApiToken,
        request: &GraphqlRequest,
    ) -> Result<RawResponse, FeedError> {
        let url = format!("{}/graphql", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("bearer {}", token.as_str()))
            // .json() sets Content-Type: application/json
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn api_token_rejects_empty_values(#[case] raw: &str) {
        let result = ApiToken::new(raw);

        assert!(matches!(result, Err(FeedError::InvalidConfiguration(_))));
    }

    #[test]
    fn api_token_keeps_valid_values_verbatim() {
        let token = ApiToken::new("ghp_abc123").unwrap();

        assert_eq!(token.as_str(), "ghp_abc123");
    }

    #[tokio::test]
    async fn post_sends_query_with_required_headers() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/graphql")
            .match_header("authorization", "bearer test-token")
            .match_header("content-type", "application/json")
            .match_header("user-agent", "ghsa-feed")
            .match_body(Matcher::Json(serde_json::json!({
                "query": "query { viewer }"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {}}"#)
            .create_async()
            .await;

        let transport = GithubTransport::new(&server.url());
        let token = ApiToken::new("test-token").unwrap();
        let response = transport
            .post(
                &token,
                &GraphqlRequest {
                    query: "query { viewer }".to_string(),
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"data": {}}"#);
    }

    #[tokio::test]
    async fn post_passes_error_status_through_untouched() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/graphql")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let transport = GithubTransport::new(&server.url());
        let token = ApiToken::new("test-token").unwrap();
        let response = transport
            .post(
                &token,
                &GraphqlRequest {
                    query: "query {}".to_string(),
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 502);
    }

    #[tokio::test]
    async fn post_surfaces_connection_failures() {
        // Nothing listens on this port
        let transport = GithubTransport::new("http://127.0.0.1:1");
        let token = ApiToken::new("test-token").unwrap();

        let result = transport
            .post(
                &token,
                &GraphqlRequest {
                    query: "query {}".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(FeedError::Transport(_))));
    }
}
