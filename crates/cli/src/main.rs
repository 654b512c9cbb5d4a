//! Org announcer CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Read configuration** from the environment (see [`config`]). A missing
//!    required variable prints one line to stderr and exits with status 1
//!    before anything else happens.
//! 2. **Wire observability**: install the `tracing-subscriber` stack.
//! 3. **Construct infrastructure**: build the authenticated
//!    [`github::GithubClient`] and lend it to the [`announcer::Announcer`].
//! 4. **Run** the announcement once over the organization. Per-repository
//!    failures are logged and do not affect the exit status; only a failure to
//!    resolve or list the organization does.

mod config;
mod telemetry;

use std::process::ExitCode;

use announcer::{Announcer, RunSummary};
use anyhow::Context;
use github::GithubClient;
use tracing::error;

use crate::config::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    telemetry::init(settings.log_format);

    match run(&settings).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Announcement run aborted: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: &Settings) -> anyhow::Result<RunSummary> {
    let client = GithubClient::with_base_url(settings.token.expose(), settings.api_url.as_str())
        .context("Failed to construct GitHub client")?;

    Announcer::new(&client, &settings.announcement)
        .run(&settings.org)
        .await
        .with_context(|| format!("Announcement to '{}' did not complete", settings.org))
}
