use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::config::Options;
use crate::fetcher::Fetcher;
use crate::filter::FilterPipeline;
use crate::types::{Issue, PullRequest, Tag};

/// One changelog section: a release tag (or the unreleased bucket) with the
/// issues and pull requests falling into its window.
pub struct Section {
    /// `None` for the unreleased bucket.
    pub tag: Option<Tag>,
    /// The next-older tag; lower bound of the window and compare-link base.
    pub previous_tag: Option<Tag>,
    /// Commit timestamp of `tag`, for the section heading.
    pub date: Option<DateTime<Utc>>,
    pub issues: Vec<Issue>,
    pub pull_requests: Vec<PullRequest>,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.pull_requests.is_empty()
    }
}

/// Run the whole pipeline and render the changelog.
///
/// Fetches tags and closed records once, label-filters globally, then
/// walks the tag list newest to oldest, bounding each section to the
/// window between adjacent tags and reconciling milestones per tag.
pub fn generate(options: &Options, fetcher: &dyn Fetcher) -> Result<String> {
    let tags = fetcher.fetch_tags().context("fetching tags")?;
    let (all_issues, all_prs) = fetcher
        .fetch_closed_issues_and_prs()
        .context("fetching closed issues and pull requests")?;
    tracing::info!(
        "fetched {} tags, {} closed issues, {} closed pull requests",
        tags.len(),
        all_issues.len(),
        all_prs.len()
    );

    let pipeline = FilterPipeline::new(options, &tags, fetcher);
    let issues = if options.issues {
        pipeline.filtered_issues(&all_issues)
    } else {
        Vec::new()
    };
    let pull_requests = if options.pulls {
        pipeline.filtered_pull_requests(&all_prs)?
    } else {
        Vec::new()
    };

    let build = |newer: Option<&Tag>, older: Option<&Tag>| -> Result<Section> {
        let mut section_issues =
            pipeline.bounded(&issues, |i| i.closed_at.as_deref(), older, newer)?;
        if options.filter_issues_by_milestone {
            section_issues = pipeline.issues_for_tag(
                section_issues,
                newer.map(|t| t.name.as_str()),
                &all_issues,
            );
        }
        let section_prs =
            pipeline.bounded(&pull_requests, |p| p.merged_at.as_deref(), older, newer)?;
        let date = match newer {
            Some(tag) => fetcher.tag_time(&tag.name)?,
            None => None,
        };
        Ok(Section {
            tag: newer.cloned(),
            previous_tag: older.cloned(),
            date,
            issues: section_issues,
            pull_requests: section_prs,
        })
    };

    let mut sections = Vec::new();
    if options.unreleased {
        let unreleased = build(None, tags.first())?;
        if !unreleased.is_empty() {
            sections.push(unreleased);
        }
    }
    for (idx, tag) in tags.iter().enumerate() {
        sections.push(build(Some(tag), tags.get(idx + 1))?);
    }

    Ok(crate::markdown::render(&sections, options))
}
