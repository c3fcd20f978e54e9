use serde::{Deserialize, Serialize};

use super::common::{Actor, Label, Milestone, Record};

// ---------------------------------------------------------------------------
// Pull request domain type
// ---------------------------------------------------------------------------

/// A closed pull request.
///
/// `merged_at` is absent on entries coming from the issues listing; the
/// merge reconciler copies it over from the separately fetched closed-PR
/// list, and drops entries that never acquire one. Both date fields stay
/// textual for the same reason as on [`Issue`](super::Issue).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub milestone: Option<Milestone>,
    pub closed_at: Option<String>,
    pub merged_at: Option<String>,
    pub author: Option<Actor>,
    #[serde(default)]
    pub url: String,
}

impl Record for PullRequest {
    fn number(&self) -> u64 {
        self.number
    }

    fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn milestone(&self) -> Option<&Milestone> {
        self.milestone.as_ref()
    }
}
