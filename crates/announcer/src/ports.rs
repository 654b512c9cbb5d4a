//! The port through which the announcer talks to GitHub.
//!
//! Infrastructure crates implement [`GitHubHost`]; the run loop only ever sees
//! this trait. Pagination, authentication and HTTP status mapping are the
//! implementation's concern.

use async_trait::async_trait;

use crate::{
    ContentEntry, GitHubError, Issue, IssueBody, IssueNumber, IssueTitle, Organization,
    OrganizationName, PageCursor, RepositoryName, RepositoryPage,
};

/// Read and write access to the GitHub resources the announcer touches.
///
/// Every call is awaited to completion before the next one is issued; an
/// implementation is used serially by a single run.
#[async_trait]
pub trait GitHubHost: Send + Sync {
    /// Looks up an organization by login.
    async fn get_organization(&self, org: &OrganizationName) -> Result<Organization, GitHubError>;

    /// Fetches one page of the organization's source (non-fork) repositories.
    async fn list_source_repositories(
        &self,
        org: &OrganizationName,
        page: PageCursor,
    ) -> Result<RepositoryPage, GitHubError>;

    /// Lists the entries of a directory; `""` is the repository root.
    ///
    /// Returns [`GitHubError::NotFound`] when the directory does not exist or
    /// the repository is empty.
    async fn list_directory(
        &self,
        repo: &RepositoryName,
        path: &str,
    ) -> Result<Vec<ContentEntry>, GitHubError>;

    /// Searches the repository for issues, open or closed, whose title
    /// contains `title`. Results are in the search API's own order.
    async fn search_issues(
        &self,
        repo: &RepositoryName,
        title: &IssueTitle,
    ) -> Result<Vec<Issue>, GitHubError>;

    /// Opens a new issue.
    async fn create_issue(
        &self,
        repo: &RepositoryName,
        title: &IssueTitle,
        body: &IssueBody,
    ) -> Result<Issue, GitHubError>;

    /// Replaces the body of an existing issue, leaving its title and state alone.
    async fn update_issue_body(
        &self,
        repo: &RepositoryName,
        number: IssueNumber,
        body: &IssueBody,
    ) -> Result<Issue, GitHubError>;
}
