use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::types::{Issue, PullRequest, Tag};

/// Collaborator interface the filter core and the generator consume.
///
/// Implementations may block (the real one drives a network client); the
/// callers are synchronous. Implemented by both `GitHubFetcher` and
/// `StubFetcher`.
pub trait Fetcher {
    /// All closed issues and pull requests of the repository. The tracker
    /// serves both through one listing; entries carrying a pull-request
    /// marker land in the second vector.
    fn fetch_closed_issues_and_prs(&self) -> Result<(Vec<Issue>, Vec<PullRequest>)>;

    /// The closed pull-request list, which is the only listing that carries
    /// merge timestamps. An empty result is valid.
    fn fetch_closed_pull_requests(&self) -> Result<Vec<PullRequest>>;

    /// Release tags, newest first.
    fn fetch_tags(&self) -> Result<Vec<Tag>>;

    /// Commit timestamp behind a tag; `None` signals "unbounded on this
    /// side" (e.g. an unknown tag).
    fn tag_time(&self, tag_name: &str) -> Result<Option<DateTime<Utc>>>;
}
