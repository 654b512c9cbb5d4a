//! Shared value types for the announcer domain.
//!
//! These mirror the slices of GitHub's REST resources the announcer actually
//! reads. They are fetched fresh on every run and never persisted.

use serde::{Deserialize, Serialize};

use crate::{CommunityFile, IssueBody, IssueNumber, IssueTitle, OrganizationName, RepositoryName};

// ---------------------------------------------------------------------------
// Organizations and repositories
// ---------------------------------------------------------------------------

/// A GitHub organization, as returned by the organization lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization login.
    pub login: OrganizationName,

    /// Browser URL of the organization.
    pub html_url: String,
}

/// A source (non-fork) repository in the target organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Full name in `"owner/repo"` format.
    pub full_name: RepositoryName,

    /// Browser URL of the repository; used in every log line about it.
    pub html_url: String,

    /// Archived repositories are read-only and never receive an issue.
    pub archived: bool,

    /// `false` when the issue tracker is disabled for the repository.
    pub has_issues: bool,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Opaque position in the organization's repository listing.
///
/// Wraps the 1-based page number of GitHub's page-numbered listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageCursor(u32);

impl PageCursor {
    /// The cursor for the first page.
    pub fn first() -> Self {
        Self(1)
    }

    /// Creates a cursor for a specific 1-based page number.
    ///
    /// Returns `None` for page zero.
    pub fn page(number: u32) -> Option<Self> {
        if number == 0 {
            None
        } else {
            Some(Self(number))
        }
    }

    /// Returns the cursor that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the 1-based page number.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// One page of the organization's repository listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPage {
    /// Repositories on this page, in the order GitHub returned them.
    pub repositories: Vec<Repository>,

    /// Cursor of the following page, or `None` if this is the last page.
    pub next: Option<PageCursor>,
}

// ---------------------------------------------------------------------------
// Repository contents
// ---------------------------------------------------------------------------

/// Kind of an entry in a repository directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

/// A single entry in a repository directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Path relative to the repository root (e.g. `".github/CODEOWNERS"`).
    pub path: String,

    /// Entry kind.
    pub kind: ContentKind,
}

/// The repository directories inspected for a community file.
///
/// The empty string is the repository root.
pub const COMMUNITY_DIRECTORIES: [&str; 3] = ["", "docs", ".github"];

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// A GitHub issue as seen by the announcer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Per-repository issue number.
    pub number: IssueNumber,

    /// Current issue title.
    pub title: String,

    /// Browser URL of the issue.
    pub html_url: String,
}

// ---------------------------------------------------------------------------
// Announcement
// ---------------------------------------------------------------------------

/// Whether the run may write to GitHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Issues are created and updated.
    #[default]
    Live,
    /// All reads happen; writes are logged instead of performed.
    DryRun,
}

impl RunMode {
    /// Returns `true` for [`RunMode::DryRun`].
    pub fn is_dry_run(self) -> bool {
        matches!(self, Self::DryRun)
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::DryRun => write!(f, "dry-run"),
        }
    }
}

/// The announcement to publish across the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Issue title; also the search term for an existing announcement.
    pub title: IssueTitle,

    /// Issue body written on create and on update.
    pub body: IssueBody,

    /// Marker file that suppresses the announcement. `None` disables the check.
    pub community_file: Option<CommunityFile>,

    /// Live or dry-run.
    pub mode: RunMode,
}

impl Announcement {
    /// Returns the configured community file together with the first entry
    /// whose path matches it.
    ///
    /// Always `None` when no community file is configured.
    pub fn find_community_file<'a>(
        &'a self,
        entries: &'a [ContentEntry],
    ) -> Option<(&'a CommunityFile, &'a ContentEntry)> {
        let marker = self.community_file.as_ref()?;
        let entry = entries.iter().find(|entry| marker.matches(&entry.path))?;
        Some((marker, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn announcement(community_file: Option<&str>) -> Announcement {
        Announcement {
            title: IssueTitle::new("Org-wide code of conduct").unwrap(),
            body: IssueBody::new("We are adding a default code of conduct.").unwrap(),
            community_file: community_file.and_then(CommunityFile::new),
            mode: RunMode::Live,
        }
    }

    fn file(path: &str) -> ContentEntry {
        ContentEntry {
            path: path.to_string(),
            kind: ContentKind::File,
        }
    }

    #[test]
    fn find_community_file_matches_any_listed_directory() {
        let a = announcement(Some("CODE_OF_CONDUCT.md"));
        let entries = vec![file("README.md"), file(".github/CODE_OF_CONDUCT.md")];

        let (marker, entry) = a.find_community_file(&entries).unwrap();
        assert_eq!(marker.as_str(), "CODE_OF_CONDUCT.md");
        assert_eq!(entry.path, ".github/CODE_OF_CONDUCT.md");
    }

    #[test]
    fn find_community_file_is_disabled_without_marker() {
        let a = announcement(None);
        let entries = vec![file("CODE_OF_CONDUCT.md")];

        assert!(a.find_community_file(&entries).is_none());
    }

    #[test]
    fn find_community_file_ignores_empty_listing() {
        let a = announcement(Some("CODE_OF_CONDUCT.md"));
        assert!(a.find_community_file(&[]).is_none());
    }

    #[test]
    fn page_cursor_starts_at_one_and_advances() {
        assert_eq!(PageCursor::first().as_u32(), 1);
        assert_eq!(PageCursor::first().next().as_u32(), 2);
        assert_eq!(PageCursor::page(0), None);
        assert_eq!(PageCursor::page(3).map(PageCursor::as_u32), Some(3));
    }

    #[test]
    fn run_mode_defaults_to_live() {
        assert_eq!(RunMode::default(), RunMode::Live);
        assert!(!RunMode::Live.is_dry_run());
        assert!(RunMode::DryRun.is_dry_run());
        assert_eq!(RunMode::DryRun.to_string(), "dry-run");
    }
}
