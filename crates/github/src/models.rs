//! Wire shapes of the GitHub REST resources the client reads.
//!
//! Only the fields the announcer needs are declared; serde ignores the rest.
//! Each DTO converts into its domain counterpart, rejecting values the domain
//! newtypes do not accept.

use announcer::{
    ContentEntry, ContentKind, GitHubError, Issue, IssueNumber, Organization, OrganizationName,
    Repository, RepositoryName,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationDto {
    pub login: String,
    pub html_url: String,
}

impl TryFrom<OrganizationDto> for Organization {
    type Error = GitHubError;

    fn try_from(dto: OrganizationDto) -> Result<Self, Self::Error> {
        let login = OrganizationName::new(dto.login)
            .ok_or_else(|| GitHubError::InvalidResponse("organization has an empty login".into()))?;
        Ok(Self {
            login,
            html_url: dto.html_url,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryDto {
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default = "default_true")]
    pub has_issues: bool,
}

fn default_true() -> bool {
    true
}

impl TryFrom<RepositoryDto> for Repository {
    type Error = GitHubError;

    fn try_from(dto: RepositoryDto) -> Result<Self, Self::Error> {
        let full_name = RepositoryName::new(dto.full_name).ok_or_else(|| {
            GitHubError::InvalidResponse("repository has an empty full_name".into())
        })?;
        Ok(Self {
            full_name,
            html_url: dto.html_url,
            archived: dto.archived,
            has_issues: dto.has_issues,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentDto {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
}

impl From<ContentDto> for ContentEntry {
    fn from(dto: ContentDto) -> Self {
        Self {
            path: dto.path,
            kind: dto.kind,
        }
    }
}

/// `GET /repos/{owner}/{repo}/contents/{path}` answers with an array for a
/// directory and a single object when the path names a file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContentsResponse {
    Listing(Vec<ContentDto>),
    Single(ContentDto),
}

impl ContentsResponse {
    pub fn into_entries(self) -> Vec<ContentEntry> {
        match self {
            Self::Listing(items) => items.into_iter().map(ContentEntry::from).collect(),
            Self::Single(item) => vec![item.into()],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueDto {
    pub number: u64,
    pub title: String,
    pub html_url: String,
}

impl From<IssueDto> for Issue {
    fn from(dto: IssueDto) -> Self {
        Self {
            number: IssueNumber::new(dto.number),
            title: dto.title,
            html_url: dto.html_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchIssuesResponse {
    pub items: Vec<IssueDto>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateIssueRequest<'a> {
    pub body: &'a str,
}

/// Body GitHub sends with most error responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
