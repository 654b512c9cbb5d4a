//! Core domain for the organization announcer.
//!
//! This crate contains every domain concept, newtype identifier, error type and
//! the [`GitHubHost`] port used by the announcer, plus the run loop itself.
//! Infrastructure crates implement [`GitHubHost`]; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed from GitHub; the `github` crate defines *how*
//! to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`OrganizationName`, `IssueTitle`, etc.) |
//! | [`types`] | Value types (`Repository`, `ContentEntry`, `Issue`, `Announcement`, etc.) |
//! | [`errors`] | `GitHubError` and run-aborting `AnnouncerError` |
//! | [`ports`] | The `GitHubHost` trait |
//! | [`pages`] | Lazy cursor over an organization's repositories |
//! | [`announcer`] | The run loop and per-repository outcomes |

pub mod announcer;
pub mod errors;
pub mod identifiers;
pub mod pages;
pub mod ports;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use announcer::{Announcer, RepositoryOutcome, RunSummary};
pub use errors::{AnnouncerError, GitHubError};
pub use identifiers::{
    CommunityFile, IssueBody, IssueNumber, IssueTitle, OrganizationName, RepositoryName, RunId,
};
pub use pages::RepositoryPages;
pub use ports::GitHubHost;
pub use types::{
    Announcement, ContentEntry, ContentKind, Issue, Organization, PageCursor, Repository,
    RepositoryPage, RunMode, COMMUNITY_DIRECTORIES,
};
