// Filter core — pure selection logic over already-fetched records.
// The only collaborator calls are the closed-PR fetch (merge reconciler)
// and the tag timestamp resolver (time-range selector).

mod labels;
mod merged;
mod milestone;
mod time_range;

pub use labels::filter_by_labels;
pub use merged::reconcile_merged;
pub use milestone::reconcile_by_milestone;
pub use time_range::select_by_time_range;

use anyhow::Result;

use crate::config::Options;
use crate::fetcher::Fetcher;
use crate::types::{Issue, PullRequest, Tag};

/// Orchestrates the individual filters into the two public entry points.
///
/// Holds explicit references to the options bag, the release tag list and
/// the fetcher; one pipeline per changelog-generation run.
pub struct FilterPipeline<'a> {
    options: &'a Options,
    all_tags: &'a [Tag],
    fetcher: &'a dyn Fetcher,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(options: &'a Options, all_tags: &'a [Tag], fetcher: &'a dyn Fetcher) -> Self {
        Self {
            options,
            all_tags,
            fetcher,
        }
    }

    /// Issues surviving the label include/exclude rules.
    pub fn filtered_issues(&self, issues: &[Issue]) -> Vec<Issue> {
        let filtered = filter_by_labels(
            issues,
            self.options.include_labels.as_deref(),
            self.options.exclude_labels.as_deref(),
            self.options.add_issues_wo_labels,
        );
        tracing::info!("filtered issues: {}", filtered.len());
        filtered
    }

    /// Pull requests surviving the label rules and carrying an actual merge
    /// timestamp. Fails when the closed-PR fetch fails.
    pub fn filtered_pull_requests(&self, pull_requests: &[PullRequest]) -> Result<Vec<PullRequest>> {
        let filtered = filter_by_labels(
            pull_requests,
            self.options.include_labels.as_deref(),
            self.options.exclude_labels.as_deref(),
            self.options.add_pr_wo_labels,
        );
        let merged = reconcile_merged(&filtered, self.fetcher)?;
        tracing::info!("filtered pull requests: {}", merged.len());
        Ok(merged)
    }

    /// Milestone reconciliation for one release tag (`None` = unreleased
    /// bucket). `all_issues` is the unfiltered universe used for backfill.
    pub fn issues_for_tag(
        &self,
        filtered_issues: Vec<Issue>,
        tag_name: Option<&str>,
        all_issues: &[Issue],
    ) -> Vec<Issue> {
        reconcile_by_milestone(filtered_issues, tag_name, all_issues, self.all_tags)
    }

    /// Bound `records` to the window between two tags, resolving tag
    /// timestamps through the fetcher.
    pub fn bounded<R, D>(
        &self,
        records: &[R],
        date_of: D,
        older_tag: Option<&Tag>,
        newer_tag: Option<&Tag>,
    ) -> Result<Vec<R>>
    where
        R: Clone,
        D: Fn(&R) -> Option<&str>,
    {
        select_by_time_range(records, date_of, older_tag, newer_tag, |name| {
            self.fetcher.tag_time(name)
        })
    }
}
