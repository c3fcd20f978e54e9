use serde::{Deserialize, Serialize};

/// A named release point.
///
/// Tags carry no timestamp of their own — the commit date behind a tag is
/// resolved lazily through the fetcher, so listing tags stays a single
/// cheap API call. The release order (newest first) is established by the
/// caller that fetched the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub sha: String,
}
