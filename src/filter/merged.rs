use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::fetcher::Fetcher;
use crate::types::PullRequest;

/// Cross-reference `pull_requests` against the tracker's closed-PR list to
/// attach merge timestamps, and drop entries that never acquire one.
///
/// The closed list is fetched once and turned into a lookup map keyed by
/// PR number. Each match consumes its map entry, so two input PRs with the
/// same number can never share one closed entry. The result is a new list;
/// the input is left untouched. An empty closed list is valid and yields
/// an empty result — only a transport failure is an error.
pub fn reconcile_merged(
    pull_requests: &[PullRequest],
    fetcher: &dyn Fetcher,
) -> Result<Vec<PullRequest>> {
    let closed = fetcher
        .fetch_closed_pull_requests()
        .context("fetching closed pull requests")?;
    tracing::debug!("closed pull requests fetched: {}", closed.len());

    let mut pool: HashMap<u64, PullRequest> =
        closed.into_iter().map(|pr| (pr.number, pr)).collect();

    let mut reconciled: Vec<PullRequest> = pull_requests
        .iter()
        .map(|pr| {
            let mut pr = pr.clone();
            if let Some(closed_pr) = pool.remove(&pr.number) {
                pr.merged_at = closed_pr.merged_at;
            }
            pr
        })
        .collect();

    reconciled.retain(|pr| pr.merged_at.is_some());
    Ok(reconciled)
}
