use serde::{Deserialize, Serialize};

use super::common::{Actor, Label, Milestone, Record};

// ---------------------------------------------------------------------------
// Issue domain type
// ---------------------------------------------------------------------------

/// A closed issue as returned by the tracker, reduced to the fields the
/// changelog cares about.
///
/// `closed_at` stays textual: the time-range selector owns parsing and
/// treats a malformed value as "no timestamp".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub milestone: Option<Milestone>,
    pub closed_at: Option<String>,
    pub author: Option<Actor>,
    #[serde(default)]
    pub url: String,
}

impl Record for Issue {
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
