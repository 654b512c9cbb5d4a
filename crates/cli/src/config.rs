//! Environment-driven configuration.
//!
//! Read once at start-up through a `figment` environment provider. Required
//! variables that are absent or empty abort the run before any GitHub call is
//! made.

use announcer::{Announcement, CommunityFile, IssueBody, IssueTitle, OrganizationName, RunMode};
use figment::providers::Env;
use figment::Figment;
use github::DEFAULT_API_URL;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use thiserror::Error;

pub const GH_ORG: &str = "GH_ORG";
pub const GH_TOKEN: &str = "GH_TOKEN";
pub const GH_ISSUE_TITLE: &str = "GH_ISSUE_TITLE";
pub const GH_ISSUE_DESCRIPTION: &str = "GH_ISSUE_DESCRIPTION";
pub const GH_COMMUNITY_FILE: &str = "GH_COMMUNITY_FILE";
pub const DRY_RUN: &str = "DRY_RUN";
pub const GH_API_URL: &str = "GH_API_URL";
pub const LOG_FORMAT: &str = "LOG_FORMAT";

const ALL_VARIABLES: [&str; 8] = [
    GH_ORG,
    GH_TOKEN,
    GH_ISSUE_TITLE,
    GH_ISSUE_DESCRIPTION,
    GH_COMMUNITY_FILE,
    DRY_RUN,
    GH_API_URL,
    LOG_FORMAT,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Failed to read configuration from the environment: {0}")]
    Load(String),
}

/// A GitHub token. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Log line encoding on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Environment as extracted by figment, before validation.
///
/// `Env` lowercases keys, so fields are the lowercased variable names.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default, deserialize_with = "scalar_string")]
    gh_org: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    gh_token: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    gh_issue_title: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    gh_issue_description: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    gh_community_file: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    dry_run: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    gh_api_url: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    log_format: Option<String>,
}

impl RawSettings {
    fn load() -> Result<Self, ConfigError> {
        Figment::from(Env::raw().only(&ALL_VARIABLES))
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))
    }
}

/// `Env` parses values, so `DRY_RUN=true` arrives as a boolean and
/// `GH_ISSUE_TITLE=2024` as an integer. Every scalar is read back as text.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a string or scalar value")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(self)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_char<E: de::Error>(self, v: char) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }
    }

    deserializer.deserialize_option(ScalarVisitor)
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub org: OrganizationName,
    pub token: Token,
    pub announcement: Announcement,
    pub api_url: String,
    pub log_format: LogFormat,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_raw(RawSettings::load()?)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        let title = required(GH_ISSUE_TITLE, raw.gh_issue_title, IssueTitle::new)?;
        let body = required(GH_ISSUE_DESCRIPTION, raw.gh_issue_description, IssueBody::new)?;
        let token = required(GH_TOKEN, raw.gh_token, |v| (!v.is_empty()).then(|| Token(v)))?;
        let org = required(GH_ORG, raw.gh_org, OrganizationName::new)?;

        let mode = match raw.dry_run.as_deref() {
            Some("true") => RunMode::DryRun,
            _ => RunMode::Live,
        };
        let log_format = match raw.log_format.as_deref() {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            org,
            token,
            announcement: Announcement {
                title,
                body,
                community_file: raw.gh_community_file.and_then(CommunityFile::new),
                mode,
            },
            api_url: raw
                .gh_api_url
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            log_format,
        })
    }
}

/// Validates a required value; `parse` returning `None` (empty value) counts
/// as missing.
fn required<T>(
    name: &'static str,
    value: Option<String>,
    parse: impl FnOnce(String) -> Option<T>,
) -> Result<T, ConfigError> {
    value.and_then(parse).ok_or(ConfigError::Missing(name))
}
