//! In-memory [`GitHubHost`] used by the unit tests of this crate.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    ContentEntry, ContentKind, GitHubError, GitHubHost, Issue, IssueBody, IssueNumber, IssueTitle,
    Organization, OrganizationName, PageCursor, Repository, RepositoryName, RepositoryPage,
};

/// A recorded call against the fake host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    GetOrganization,
    ListRepositories(u32),
    ListDirectory(String, String),
    Search(String),
    Create(String),
    Update(String, u64),
}

#[derive(Debug, Clone)]
pub(crate) struct StoredIssue {
    pub number: u64,
    pub title: String,
    pub body: String,
}

#[derive(Default)]
struct State {
    pages: Vec<Vec<Repository>>,
    failing_page: Option<u32>,
    missing_org: bool,
    directories: HashMap<(String, String), Result<Vec<ContentEntry>, GitHubError>>,
    issues: HashMap<String, Vec<StoredIssue>>,
    failing_search: HashSet<String>,
    failing_create: HashSet<String>,
    calls: Vec<Call>,
}

pub(crate) struct FakeHost {
    org: String,
    state: Mutex<State>,
}

pub(crate) fn repo(full_name: &str) -> Repository {
    Repository {
        full_name: RepositoryName::new(full_name).unwrap(),
        html_url: format!("https://github.com/{full_name}"),
        archived: false,
        has_issues: true,
    }
}

pub(crate) fn file(path: &str) -> ContentEntry {
    ContentEntry {
        path: path.to_string(),
        kind: ContentKind::File,
    }
}

fn issue_url(repo: &str, number: u64) -> String {
    format!("https://github.com/{repo}/issues/{number}")
}

impl FakeHost {
    pub fn new(org: &str) -> Self {
        Self {
            org: org.to_string(),
            state: Mutex::new(State::default()),
        }
    }

    fn state_mut(&mut self) -> &mut State {
        self.state.get_mut().unwrap()
    }

    pub fn with_page(mut self, repos: Vec<Repository>) -> Self {
        self.state_mut().pages.push(repos);
        self
    }

    pub fn fail_listing_page(mut self, page: u32) -> Self {
        self.state_mut().failing_page = Some(page);
        self
    }

    pub fn without_organization(mut self) -> Self {
        self.state_mut().missing_org = true;
        self
    }

    pub fn with_directory(mut self, repo: &str, path: &str, entries: Vec<ContentEntry>) -> Self {
        self.state_mut()
            .directories
            .insert((repo.to_string(), path.to_string()), Ok(entries));
        self
    }

    pub fn with_directory_error(mut self, repo: &str, path: &str, err: GitHubError) -> Self {
        self.state_mut()
            .directories
            .insert((repo.to_string(), path.to_string()), Err(err));
        self
    }

    pub fn with_issue(mut self, repo: &str, title: &str, body: &str) -> Self {
        let issues = self.state_mut().issues.entry(repo.to_string()).or_default();
        let number = issues.len() as u64 + 1;
        issues.push(StoredIssue {
            number,
            title: title.to_string(),
            body: body.to_string(),
        });
        self
    }

    pub fn fail_search(mut self, repo: &str) -> Self {
        self.state_mut().failing_search.insert(repo.to_string());
        self
    }

    pub fn fail_create(mut self, repo: &str) -> Self {
        self.state_mut().failing_create.insert(repo.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn issues(&self, repo: &str) -> Vec<StoredIssue> {
        self.state
            .lock()
            .unwrap()
            .issues
            .get(repo)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of create and update calls made.
    pub fn writes(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Update(..)))
            .count()
    }

    /// Calls made for one repository, excluding organization-level calls.
    pub fn calls_for(&self, repo: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| match c {
                Call::ListDirectory(r, _)
                | Call::Search(r)
                | Call::Create(r)
                | Call::Update(r, _) => r == repo,
                Call::GetOrganization | Call::ListRepositories(_) => false,
            })
            .collect()
    }
}

#[async_trait]
impl GitHubHost for FakeHost {
    async fn get_organization(&self, org: &OrganizationName) -> Result<Organization, GitHubError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::GetOrganization);
        if state.missing_org || org.as_str() != self.org {
            return Err(GitHubError::NotFound {
                resource: format!("orgs/{org}"),
            });
        }
        Ok(Organization {
            login: org.clone(),
            html_url: format!("https://github.com/{org}"),
        })
    }

    async fn list_source_repositories(
        &self,
        _org: &OrganizationName,
        page: PageCursor,
    ) -> Result<RepositoryPage, GitHubError> {
        let mut state = self.state.lock().unwrap();
        let number = page.as_u32();
        state.calls.push(Call::ListRepositories(number));
        if state.failing_page == Some(number) {
            return Err(GitHubError::Api {
                status: 502,
                message: "Bad Gateway".into(),
            });
        }

        let index = number as usize - 1;
        let repositories = state.pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < state.pages.len()).then(|| page.next());
        Ok(RepositoryPage { repositories, next })
    }

    async fn list_directory(
        &self,
        repo: &RepositoryName,
        path: &str,
    ) -> Result<Vec<ContentEntry>, GitHubError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(Call::ListDirectory(repo.to_string(), path.to_string()));
        state
            .directories
            .get(&(repo.to_string(), path.to_string()))
            .cloned()
            .unwrap_or_else(|| {
                Err(GitHubError::NotFound {
                    resource: format!("repos/{repo}/contents/{path}"),
                })
            })
    }

    async fn search_issues(
        &self,
        repo: &RepositoryName,
        title: &IssueTitle,
    ) -> Result<Vec<Issue>, GitHubError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Search(repo.to_string()));
        if state.failing_search.contains(repo.as_str()) {
            return Err(GitHubError::Api {
                status: 422,
                message: "Validation Failed".into(),
            });
        }

        let found = state
            .issues
            .get(repo.as_str())
            .map(|issues| {
                issues
                    .iter()
                    .filter(|i| i.title.contains(title.as_str()))
                    .map(|i| Issue {
                        number: IssueNumber::new(i.number),
                        title: i.title.clone(),
                        html_url: issue_url(repo.as_str(), i.number),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(found)
    }

    async fn create_issue(
        &self,
        repo: &RepositoryName,
        title: &IssueTitle,
        body: &IssueBody,
    ) -> Result<Issue, GitHubError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(repo.to_string()));
        if state.failing_create.contains(repo.as_str()) {
            return Err(GitHubError::RateLimited {
                message: "API rate limit exceeded".into(),
            });
        }

        let issues = state.issues.entry(repo.to_string()).or_default();
        let number = issues.len() as u64 + 1;
        issues.push(StoredIssue {
            number,
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(Issue {
            number: IssueNumber::new(number),
            title: title.to_string(),
            html_url: issue_url(repo.as_str(), number),
        })
    }

    async fn update_issue_body(
        &self,
        repo: &RepositoryName,
        number: IssueNumber,
        body: &IssueBody,
    ) -> Result<Issue, GitHubError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(Call::Update(repo.to_string(), number.as_u64()));

        let stored = state
            .issues
            .get_mut(repo.as_str())
            .and_then(|issues| issues.iter_mut().find(|i| i.number == number.as_u64()))
            .ok_or_else(|| GitHubError::NotFound {
                resource: format!("repos/{repo}/issues/{}", number.as_u64()),
            })?;
        stored.body = body.to_string();
        Ok(Issue {
            number,
            title: stored.title.clone(),
            html_url: issue_url(repo.as_str(), number.as_u64()),
        })
    }
}
