//! Org announcer GitHub infrastructure adapter.
//!
//! Implements the [`announcer::GitHubHost`] port over the GitHub REST API using
//! [`reqwest`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.
//! All GitHub API details (authentication headers, pagination, status-code
//! mapping, wire formats) are handled here; the [`announcer`] crate never sees
//! them.
//!
//! ## Endpoints
//!
//! | Port method | Endpoint |
//! |-------------|----------|
//! | `get_organization` | `GET /orgs/{org}` |
//! | `list_source_repositories` | `GET /orgs/{org}/repos?type=sources` |
//! | `list_directory` | `GET /repos/{owner}/{repo}/contents/{path}` |
//! | `search_issues` | `GET /search/issues` |
//! | `create_issue` | `POST /repos/{owner}/{repo}/issues` |
//! | `update_issue_body` | `PATCH /repos/{owner}/{repo}/issues/{number}` |

mod client;
mod errors;
mod models;
mod pagination;

pub use client::{GithubClient, DEFAULT_API_URL};
pub use errors::ClientError;
