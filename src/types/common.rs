use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Common supporting types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Parse `"owner/name"` into a `RepoRef`.
    pub fn from_full_name(s: &str) -> Option<Self> {
        let (owner, name) = s.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// A tracker milestone, identified solely by its title. A milestone "is a
/// tag" iff some tag's name equals the title (case-sensitive exact match).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
}

// ---------------------------------------------------------------------------
// Record trait
// ---------------------------------------------------------------------------

/// Common view over issues and pull requests that the filter core operates
/// on: a stable identifier, a label set, and an optional milestone.
pub trait Record {
    fn number(&self) -> u64;
    fn labels(&self) -> &[Label];
    fn milestone(&self) -> Option<&Milestone>;

    fn has_label(&self, name: &str) -> bool {
        self.labels().iter().any(|l| l.name == name)
    }

    fn is_unlabeled(&self) -> bool {
        self.labels().is_empty()
    }
}
