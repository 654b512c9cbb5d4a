//! Error types for the announcer domain.
//!
//! [`GitHubError`] is what every [`crate::GitHubHost`] method reports. The run
//! loop decides per call site whether such a failure is scoped to one
//! repository or aborts the whole run.
//!
//! [`AnnouncerError`] covers the conditions that abort a run: the organization
//! itself cannot be resolved or listed.

use thiserror::Error;

use crate::OrganizationName;

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Failures reported by a [`crate::GitHubHost`] implementation.
///
/// Transport details are flattened into strings so this crate never depends on
/// an HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitHubError {
    /// The requested resource does not exist (HTTP 404).
    ///
    /// Also returned for the contents of an empty repository.
    #[error("Not found: {resource}")]
    NotFound {
        /// Path or description of the missing resource.
        resource: String,
    },

    /// The token was rejected (HTTP 401).
    #[error("Authentication failed: {message}")]
    Unauthorized {
        /// Message reported by GitHub.
        message: String,
    },

    /// The primary or secondary rate limit was exhausted.
    #[error("Rate limit exceeded: {message}")]
    RateLimited {
        /// Message reported by GitHub.
        message: String,
    },

    /// Any other non-success response.
    #[error("GitHub API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message reported by GitHub, or the raw body when none was present.
        message: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but its body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GitHubError {
    /// Returns `true` for [`GitHubError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ---------------------------------------------------------------------------
// Run-level errors
// ---------------------------------------------------------------------------

/// Errors that abort an announcer run.
///
/// Per-repository failures never surface here; they are logged and counted in
/// the [`crate::RunSummary`].
#[derive(Debug, Error)]
pub enum AnnouncerError {
    /// The organization lookup failed.
    #[error("Failed to look up organization '{org}': {source}")]
    Organization {
        /// Organization that was requested.
        org: OrganizationName,
        /// Underlying port failure.
        #[source]
        source: GitHubError,
    },

    /// Fetching a page of the organization's repository listing failed.
    #[error("Failed to list repositories of '{org}': {source}")]
    Listing {
        /// Organization being listed.
        org: OrganizationName,
        /// Underlying port failure.
        #[source]
        source: GitHubError,
    },
}
