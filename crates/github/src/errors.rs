//! Client construction errors and HTTP status mapping.

use announcer::GitHubError;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;

use crate::models::ErrorBody;

/// Failures while building a [`crate::GithubClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The token contains characters that cannot appear in an HTTP header.
    #[error("GitHub token is not a valid header value")]
    InvalidToken,

    /// The underlying HTTP client could not be initialised (e.g. TLS backend).
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Maps a non-success response to a [`GitHubError`].
///
/// - 404 → [`GitHubError::NotFound`]
/// - 401 → [`GitHubError::Unauthorized`]
/// - 429, or 403 with an exhausted or secondary rate limit → [`GitHubError::RateLimited`]
/// - anything else → [`GitHubError::Api`]
pub(crate) fn from_response(
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
    resource: &str,
) -> GitHubError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::NOT_FOUND => GitHubError::NotFound {
            resource: resource.to_string(),
        },
        StatusCode::UNAUTHORIZED => GitHubError::Unauthorized { message },
        StatusCode::TOO_MANY_REQUESTS => GitHubError::RateLimited { message },
        StatusCode::FORBIDDEN if is_rate_limited(headers, &message) => {
            GitHubError::RateLimited { message }
        }
        _ => GitHubError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

fn is_rate_limited(headers: &HeaderMap, message: &str) -> bool {
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");
    exhausted || message.to_ascii_lowercase().contains("rate limit")
}
