//! Newtype domain identifiers.
//!
//! Every name the announcer passes to GitHub is a distinct newtype wrapping a
//! primitive. This prevents accidentally interchanging, for example, an
//! [`OrganizationName`] with a [`RepositoryName`] even though both are strings
//! under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new value, returning `None` if it is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — GitHub-integer-backed
// ---------------------------------------------------------------------------

/// The per-repository number GitHub assigns to an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates a new issue number from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single announcer run.
///
/// Generated fresh for every invocation and attached to the root tracing span
/// so all log lines from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// A GitHub organization login (e.g. `"rust-lang"`).
    OrganizationName
}

string_id! {
    /// Identifies a GitHub repository in `"owner/repo"` format.
    RepositoryName
}

string_id! {
    /// The title of the announcement issue.
    ///
    /// Used both as the title of newly created issues and as the search term
    /// that finds an earlier announcement.
    IssueTitle
}

string_id! {
    /// The Markdown body written to the announcement issue on create and update.
    IssueBody
}

string_id! {
    /// A marker filename whose presence means a repository already carries the
    /// announced community file (e.g. `"CODE_OF_CONDUCT.md"`).
    CommunityFile
}

impl CommunityFile {
    /// Returns `true` if `path` ends with this filename.
    ///
    /// This is a plain string suffix match, so `docs/CODE_OF_CONDUCT.md`
    /// matches `CODE_OF_CONDUCT.md`.
    pub fn matches(&self, path: &str) -> bool {
        path.ends_with(self.as_str())
    }
}
