//! Lazily paged walk over an organization's source repositories.

use std::collections::VecDeque;

use tracing::debug;

use crate::{GitHubError, GitHubHost, OrganizationName, PageCursor, Repository};

/// Demand-driven cursor over the organization's source repositories.
///
/// A page is fetched only once every repository of the previous page has been
/// handed out. The sequence is finite and cannot be restarted; after an error
/// it yields nothing further.
pub struct RepositoryPages<'a, H: ?Sized> {
    host: &'a H,
    org: &'a OrganizationName,
    buffered: VecDeque<Repository>,
    next_page: Option<PageCursor>,
}

impl<'a, H> RepositoryPages<'a, H>
where
    H: GitHubHost + ?Sized,
{
    /// Creates a cursor positioned before the first repository.
    ///
    /// Nothing is fetched until [`RepositoryPages::next`] is first awaited.
    pub fn new(host: &'a H, org: &'a OrganizationName) -> Self {
        Self {
            host,
            org,
            buffered: VecDeque::new(),
            next_page: Some(PageCursor::first()),
        }
    }

    /// Returns the next repository, fetching a new page when needed.
    pub async fn next(&mut self) -> Result<Option<Repository>, GitHubError> {
        loop {
            if let Some(repo) = self.buffered.pop_front() {
                return Ok(Some(repo));
            }

            let Some(page) = self.next_page.take() else {
                return Ok(None);
            };

            let fetched = self.host.list_source_repositories(self.org, page).await?;
            debug!(
                org = %self.org,
                page = page.as_u32(),
                count = fetched.repositories.len(),
                has_next = fetched.next.is_some(),
                "Fetched repository page"
            );

            self.next_page = fetched.next;
            self.buffered.extend(fetched.repositories);
        }
    }
}
