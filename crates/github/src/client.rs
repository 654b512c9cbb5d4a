//! REST implementation of [`GitHubHost`].

use announcer::{
    ContentEntry, GitHubError, GitHubHost, Issue, IssueBody, IssueNumber, IssueTitle,
    Organization, OrganizationName, PageCursor, Repository, RepositoryName, RepositoryPage,
};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{self, ClientError};
use crate::models::{
    ContentsResponse, CreateIssueRequest, IssueDto, OrganizationDto, RepositoryDto,
    SearchIssuesResponse, UpdateIssueRequest,
};
use crate::pagination;

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST API version pinned through the `X-GitHub-Api-Version` header.
const API_VERSION: &str = "2022-11-28";

/// Page size requested from listing endpoints (GitHub's maximum).
const PER_PAGE: &str = "100";

/// Authenticated GitHub REST client.
///
/// Holds one pooled [`reqwest::Client`] carrying the token and API headers on
/// every request. Constructed once per run and shared by reference.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    base_url: String,
}

impl GithubClient {
    /// Creates a client for the public API at [`DEFAULT_API_URL`].
    pub fn new(token: &str) -> Result<Self, ClientError> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Creates a client for a specific API root (GitHub Enterprise Server,
    /// or a test server).
    pub fn with_base_url(token: &str, base_url: impl Into<String>) -> Result<Self, ClientError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ClientError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let http = Client::builder()
            .user_agent(concat!("org-announcer/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Returns the API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "GitHub request");
        self.http.request(method, format!("{}/{}", self.base_url, path))
    }

    /// Sends a request and turns non-success statuses into [`GitHubError`].
    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Response, GitHubError> {
        let response = request
            .send()
            .await
            .map_err(|e| GitHubError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), resource, "GitHub request failed");
        Err(errors::from_response(status, &headers, &body, resource))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GitHubError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GitHubError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| GitHubError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl GitHubHost for GithubClient {
    async fn get_organization(&self, org: &OrganizationName) -> Result<Organization, GitHubError> {
        let path = format!("orgs/{org}");
        let response = self.send(self.request(Method::GET, &path), &path).await?;
        let dto: OrganizationDto = Self::decode(response).await?;
        dto.try_into()
    }

    async fn list_source_repositories(
        &self,
        org: &OrganizationName,
        page: PageCursor,
    ) -> Result<RepositoryPage, GitHubError> {
        let path = format!("orgs/{org}/repos");
        let page_number = page.as_u32().to_string();
        let request = self.request(Method::GET, &path).query(&[
            ("type", "sources"),
            ("per_page", PER_PAGE),
            ("page", page_number.as_str()),
        ]);

        let response = self.send(request, &path).await?;
        let next = pagination::next_page(response.headers(), page.as_u32())
            .and_then(PageCursor::page);
        let dtos: Vec<RepositoryDto> = Self::decode(response).await?;
        let repositories = dtos
            .into_iter()
            .map(Repository::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RepositoryPage { repositories, next })
    }

    async fn list_directory(
        &self,
        repo: &RepositoryName,
        path: &str,
    ) -> Result<Vec<ContentEntry>, GitHubError> {
        let resource = format!("repos/{repo}/contents/{path}");
        let response = self.send(self.request(Method::GET, &resource), &resource).await?;
        let contents: ContentsResponse = Self::decode(response).await?;
        Ok(contents.into_entries())
    }

    async fn search_issues(
        &self,
        repo: &RepositoryName,
        title: &IssueTitle,
    ) -> Result<Vec<Issue>, GitHubError> {
        let query = format!("is:issue repo:{repo} in:title {title}");
        let request = self
            .request(Method::GET, "search/issues")
            .query(&[("q", query.as_str())]);

        let response = self.send(request, "search/issues").await?;
        let found: SearchIssuesResponse = Self::decode(response).await?;
        Ok(found.items.into_iter().map(Issue::from).collect())
    }

    async fn create_issue(
        &self,
        repo: &RepositoryName,
        title: &IssueTitle,
        body: &IssueBody,
    ) -> Result<Issue, GitHubError> {
        let path = format!("repos/{repo}/issues");
        let request = self.request(Method::POST, &path).json(&CreateIssueRequest {
            title: title.as_str(),
            body: body.as_str(),
        });

        let response = self.send(request, &path).await?;
        let created: IssueDto = Self::decode(response).await?;
        Ok(created.into())
    }

    async fn update_issue_body(
        &self,
        repo: &RepositoryName,
        number: IssueNumber,
        body: &IssueBody,
    ) -> Result<Issue, GitHubError> {
        let path = format!("repos/{repo}/issues/{}", number.as_u64());
        let request = self
            .request(Method::PATCH, &path)
            .json(&UpdateIssueRequest { body: body.as_str() });

        let response = self.send(request, &path).await?;
        let updated: IssueDto = Self::decode(response).await?;
        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client =
            GithubClient::with_base_url("t0ken", "https://ghe.example.com/api/v3/").unwrap();
        assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        assert!(matches!(
            GithubClient::new("bad\ntoken"),
            Err(ClientError::InvalidToken)
        ));
    }

    #[test]
    fn default_client_targets_public_api() {
        let client = GithubClient::new("t0ken").unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }
}
