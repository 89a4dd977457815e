//! `reqwest` implementation of [`GitLabApi`].

use super::{ApiError, Catalog, CatalogEntry, CreatedIssue, GitLabApi, NewIssue};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

/// Header GitLab reads private tokens from.
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// GitLab REST client.
#[derive(Debug, Clone)]
pub struct ReqwestGitLab {
    api_url: Url,
    client: Client,
}

impl ReqwestGitLab {
    /// Creates a client for the given API base URL (e.g. `https://host/api/v4`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be initialized.
    pub fn new(api_url: Url) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("chiliproject-migrator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self { api_url, client })
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.api_url.as_str().trim_end_matches('/');
        let suffix = path.trim_start_matches('/');
        format!("{base}/{suffix}")
    }

    /// Sends a request and returns the body if the status matches `expected`.
    async fn send(
        &self,
        operation: &str,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Request {
            operation: operation.to_string(),
            source: e,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Request {
            operation: operation.to_string(),
            source: e,
        })?;

        debug!(operation, status = status.as_u16(), "GitLab response");

        if status != expected {
            return Err(ApiError::UnexpectedStatus {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> Result<T, ApiError> {
        let body = self.send(operation, request, expected).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::MalformedResponse {
            operation: operation.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl GitLabApi for ReqwestGitLab {
    async fn list_catalog(
        &self,
        token: &str,
        catalog: Catalog,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CatalogEntry>, ApiError> {
        let request = self
            .client
            .get(self.endpoint(catalog.path()))
            .header(TOKEN_HEADER, token)
            .query(&[("per_page", per_page), ("page", page)]);

        self.send_json(&format!("list {catalog}"), request, StatusCode::OK)
            .await
    }

    async fn create_issue(
        &self,
        token: &str,
        project_id: u64,
        issue: &NewIssue,
    ) -> Result<CreatedIssue, ApiError> {
        let request = self
            .client
            .post(self.endpoint(&format!("projects/{project_id}/issues")))
            .header(TOKEN_HEADER, token)
            .json(issue);

        self.send_json("create issue", request, StatusCode::CREATED)
            .await
    }

    async fn close_issue(
        &self,
        token: &str,
        project_id: u64,
        issue: &CreatedIssue,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.endpoint(&format!(
                "projects/{project_id}/issues/{}",
                issue.url_id()
            )))
            .header(TOKEN_HEADER, token)
            .json(&json!({ "state_event": "close" }));

        self.send("close issue", request, StatusCode::OK).await?;
        Ok(())
    }
}
