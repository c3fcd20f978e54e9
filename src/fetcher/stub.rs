use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::types::{Issue, PullRequest, Tag};

use super::interface::Fetcher;

/// A stub fetcher that serves pre-loaded fixture data without any network
/// calls.
///
/// Useful for integration tests that must not require a `GITHUB_TOKEN`.
#[derive(Default)]
pub struct StubFetcher {
    pub issues: Vec<Issue>,
    pub pull_requests: Vec<PullRequest>,
    pub closed_pull_requests: Vec<PullRequest>,
    pub tags: Vec<Tag>,
    pub tag_times: HashMap<String, DateTime<Utc>>,
}

impl Fetcher for StubFetcher {
    fn fetch_closed_issues_and_prs(&self) -> Result<(Vec<Issue>, Vec<PullRequest>)> {
        Ok((self.issues.clone(), self.pull_requests.clone()))
    }

    fn fetch_closed_pull_requests(&self) -> Result<Vec<PullRequest>> {
        Ok(self.closed_pull_requests.clone())
    }

    fn fetch_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn tag_time(&self, tag_name: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.tag_times.get(tag_name).copied())
    }
}
