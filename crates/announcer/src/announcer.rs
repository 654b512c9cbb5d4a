//! The announcement run loop.
//!
//! One sequential pass over the organization's source repositories. For each
//! repository the path is a straight line of guard checks with early exit,
//! ending in exactly one [`RepositoryOutcome`].

use tracing::{debug, info, info_span, warn, Instrument};

use crate::{
    Announcement, AnnouncerError, ContentEntry, GitHubError, GitHubHost, Issue, IssueNumber,
    OrganizationName, Repository, RepositoryPages, RunId, COMMUNITY_DIRECTORIES,
};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What happened to a single repository during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryOutcome {
    /// The repository is archived.
    SkippedArchived,
    /// The repository has its issue tracker disabled.
    SkippedIssuesDisabled,
    /// The repository already contains the community file.
    SkippedCommunityFile,
    /// Dry run: an existing announcement would have been updated.
    WouldUpdate(IssueNumber),
    /// Dry run: a new announcement would have been created.
    WouldCreate,
    /// The body of an existing announcement was replaced.
    Updated(Issue),
    /// A new announcement was opened.
    Created(Issue),
    /// A GitHub call failed; the repository was abandoned.
    Failed,
}

/// Per-outcome counts for a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: RunId,
    pub archived: usize,
    pub issues_disabled: usize,
    pub community_file: usize,
    pub would_update: usize,
    pub would_create: usize,
    pub updated: usize,
    pub created: usize,
    pub failed: usize,
}

impl RunSummary {
    fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            archived: 0,
            issues_disabled: 0,
            community_file: 0,
            would_update: 0,
            would_create: 0,
            updated: 0,
            created: 0,
            failed: 0,
        }
    }

    fn record(&mut self, outcome: &RepositoryOutcome) {
        let counter = match outcome {
            RepositoryOutcome::SkippedArchived => &mut self.archived,
            RepositoryOutcome::SkippedIssuesDisabled => &mut self.issues_disabled,
            RepositoryOutcome::SkippedCommunityFile => &mut self.community_file,
            RepositoryOutcome::WouldUpdate(_) => &mut self.would_update,
            RepositoryOutcome::WouldCreate => &mut self.would_create,
            RepositoryOutcome::Updated(_) => &mut self.updated,
            RepositoryOutcome::Created(_) => &mut self.created,
            RepositoryOutcome::Failed => &mut self.failed,
        };
        *counter += 1;
    }

    /// Number of repositories visited.
    pub fn processed(&self) -> usize {
        self.skipped()
            + self.would_update
            + self.would_create
            + self.updated
            + self.created
            + self.failed
    }

    /// Number of repositories skipped by a guard.
    pub fn skipped(&self) -> usize {
        self.archived + self.issues_disabled + self.community_file
    }
}

// ---------------------------------------------------------------------------
// Announcer
// ---------------------------------------------------------------------------

/// Publishes an [`Announcement`] to every eligible repository of an
/// organization.
///
/// The host is borrowed for the duration of the run; the caller owns the
/// authenticated client.
pub struct Announcer<'a, H: ?Sized> {
    host: &'a H,
    announcement: &'a Announcement,
}

impl<'a, H> Announcer<'a, H>
where
    H: GitHubHost + ?Sized,
{
    pub fn new(host: &'a H, announcement: &'a Announcement) -> Self {
        Self { host, announcement }
    }

    /// Runs the announcement over every source repository of `org`.
    ///
    /// Only a failure to resolve or list the organization aborts the run.
    /// Per-repository failures are logged and counted in the summary.
    pub async fn run(&self, org: &OrganizationName) -> Result<RunSummary, AnnouncerError> {
        let run_id = RunId::new_random();
        let span = info_span!("run", %run_id, %org, mode = %self.announcement.mode);
        self.run_with_id(org, run_id).instrument(span).await
    }

    async fn run_with_id(
        &self,
        org: &OrganizationName,
        run_id: RunId,
    ) -> Result<RunSummary, AnnouncerError> {
        let organization = self
            .host
            .get_organization(org)
            .await
            .map_err(|source| AnnouncerError::Organization {
                org: org.clone(),
                source,
            })?;
        info!(
            url = %organization.html_url,
            title = %self.announcement.title,
            "Announcing to organization {}", organization.login
        );

        let mut summary = RunSummary::new(run_id);
        let mut pages = RepositoryPages::new(self.host, org);
        while let Some(repo) = pages
            .next()
            .await
            .map_err(|source| AnnouncerError::Listing {
                org: org.clone(),
                source,
            })?
        {
            let span = info_span!("repository", repo = %repo.full_name);
            let outcome = self.process(&repo).instrument(span).await;
            summary.record(&outcome);
        }

        info!(
            processed = summary.processed(),
            skipped = summary.skipped(),
            created = summary.created,
            updated = summary.updated,
            would_create = summary.would_create,
            would_update = summary.would_update,
            failed = summary.failed,
            "Announcement run complete"
        );
        Ok(summary)
    }

    /// Decides and applies the announcement for one repository.
    pub async fn process(&self, repo: &Repository) -> RepositoryOutcome {
        let url = &repo.html_url;
        debug!("Processing {url}");

        if repo.archived {
            info!("{url} is archived, skipping.");
            return RepositoryOutcome::SkippedArchived;
        }

        if !repo.has_issues {
            info!("{url} has disabled issues, skipping.");
            return RepositoryOutcome::SkippedIssuesDisabled;
        }

        let entries = match self.community_entries(repo).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "Failed to list contents of {url}");
                return RepositoryOutcome::Failed;
            }
        };

        if let Some((marker, entry)) = self.announcement.find_community_file(&entries) {
            info!(marker = %entry.path, "{url} contains existing {marker}, skipping.");
            return RepositoryOutcome::SkippedCommunityFile;
        }

        match self.publish(repo).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "Failed to create issue in {url}");
                RepositoryOutcome::Failed
            }
        }
    }

    /// Collects the listings of every community directory.
    ///
    /// Missing directories, and empty repositories, contribute nothing.
    async fn community_entries(&self, repo: &Repository) -> Result<Vec<ContentEntry>, GitHubError> {
        let mut entries = Vec::new();
        for dir in COMMUNITY_DIRECTORIES {
            match self.host.list_directory(&repo.full_name, dir).await {
                Ok(mut listing) => entries.append(&mut listing),
                Err(err) if err.is_not_found() => {
                    debug!(dir, "Directory not present");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(entries)
    }

    async fn publish(&self, repo: &Repository) -> Result<RepositoryOutcome, GitHubError> {
        let url = &repo.html_url;
        let Announcement {
            title, body, mode, ..
        } = self.announcement;

        let existing = self
            .host
            .search_issues(&repo.full_name, title)
            .await?
            .into_iter()
            .next();

        let outcome = match existing {
            Some(issue) if mode.is_dry_run() => {
                info!(issue = %issue.number, "Would update existing issue in {url}");
                RepositoryOutcome::WouldUpdate(issue.number)
            }
            Some(issue) => {
                let updated = self
                    .host
                    .update_issue_body(&repo.full_name, issue.number, body)
                    .await?;
                info!("Updated existing issue {}", updated.html_url);
                RepositoryOutcome::Updated(updated)
            }
            None if mode.is_dry_run() => {
                info!("Would create issue in {url}");
                RepositoryOutcome::WouldCreate
            }
            None => {
                let created = self.host.create_issue(&repo.full_name, title, body).await?;
                info!("Created issue {}", created.html_url);
                RepositoryOutcome::Created(created)
            }
        };
        Ok(outcome)
    }
}
