//! Production [`CommitSource`] backed by the GitHub API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::RecapConfig;
use crate::error::RecapError;
use crate::types::{CommitPage, ContributionSummary, ContributionWindow};

use super::graphql::{self, HistoryData, SummaryData};
use super::{CommitSource, COMMIT_PAGE_SIZE};

const USER_AGENT: &str = concat!("commitrecap/", env!("CARGO_PKG_VERSION"));

/// Thin HTTP client over the GitHub REST and GraphQL endpoints.
///
/// No retries and no caching: a failed call is terminal for the request
/// that issued it.
pub struct GitHubClient {
    http: reqwest::Client,
    config: RecapConfig,
}

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl GitHubClient {
    /// Build a client from configuration.
    pub fn new(config: RecapConfig) -> Result<Self, RecapError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    fn bearer(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// POST a GraphQL query and unwrap the response envelope.
    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, RecapError> {
        let request = self
            .http
            .post(&self.config.graphql_url)
            .json(&json!({ "query": query, "variables": variables }));
        let response = self.bearer(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(RecapError::from_status(status.as_u16(), detail));
        }

        let envelope: GraphQlResponse<T> = response.json().await?;
        if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(RecapError::Query(messages.join("; ")));
        }
        envelope
            .data
            .ok_or_else(|| RecapError::Query("response carried no data".to_string()))
    }

    /// GET a REST endpoint and parse the JSON body.
    pub(super) async fn rest_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, RecapError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%url, "github rest request");
        let request = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .query(params);
        let response = self.bearer(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(RecapError::from_status(status.as_u16(), detail));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CommitSource for GitHubClient {
    async fn fetch_contribution_summary(
        &self,
        login: &str,
        window: &ContributionWindow,
    ) -> Result<ContributionSummary, RecapError> {
        debug!(login, "fetching contribution summary");
        let variables = json!({
            "login": login,
            "from": window.since_rfc3339(),
            "to": window.until_rfc3339(),
        });
        let data: SummaryData = self
            .graphql(graphql::CONTRIBUTION_SUMMARY_QUERY, variables)
            .await?;
        data.into_summary()
            .ok_or_else(|| RecapError::Query(format!("login {login:?} did not resolve to a user")))
    }

    async fn fetch_commit_page(
        &self,
        owner: &str,
        name: &str,
        window: &ContributionWindow,
        author_id: &str,
        cursor: Option<&str>,
    ) -> Result<CommitPage, RecapError> {
        debug!(owner, name, ?cursor, "fetching commit page");
        let variables = json!({
            "owner": owner,
            "name": name,
            "since": window.since_rfc3339(),
            "until": window.until_rfc3339(),
            "authorId": author_id,
            "pageSize": COMMIT_PAGE_SIZE,
            "cursor": cursor,
        });
        let data: HistoryData = self
            .graphql(graphql::COMMIT_HISTORY_QUERY, variables)
            .await?;
        Ok(data.into_page())
    }
}
