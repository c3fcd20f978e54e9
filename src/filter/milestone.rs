use std::collections::HashSet;

use indexmap::IndexMap;

use crate::types::{Issue, Record, Tag};

/// Decide which issues belong to the release grouping of `tag_name`, using
/// milestone titles as a secondary release-grouping signal.
///
/// First strips every issue whose milestone title equals some tag's name:
/// those belong to a specific release and must not leak into other
/// groupings. Then, for a concrete tag, issues from the unfiltered universe
/// whose milestone equals that tag are unioned back in — an issue can be
/// label-filtered out upstream yet still surface under the release matching
/// its milestone.
///
/// `tag_name = None` is the unreleased bucket: the backfill is skipped, so
/// its output only ever loses issues. Milestones are never mutated, only
/// consulted.
pub fn reconcile_by_milestone(
    filtered_issues: Vec<Issue>,
    tag_name: Option<&str>,
    all_issues: &[Issue],
    all_tags: &[Tag],
) -> Vec<Issue> {
    let tag_names: HashSet<&str> = all_tags.iter().map(|t| t.name.as_str()).collect();

    let mut kept: IndexMap<u64, Issue> = filtered_issues
        .into_iter()
        .filter(|issue| {
            issue
                .milestone
                .as_ref()
                .is_none_or(|m| !tag_names.contains(m.title.as_str()))
        })
        .map(|issue| (issue.number, issue))
        .collect();

    if let Some(tag_name) = tag_name {
        for issue in all_issues {
            let Some(milestone) = issue.milestone() else {
                continue;
            };
            if tag_names.contains(milestone.title.as_str()) && milestone.title == tag_name {
                kept.entry(issue.number)
                    .or_insert_with(|| issue.clone());
            }
        }
    }

    kept.into_values().collect()
}
