use std::path::PathBuf;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Everything that shapes one changelog-generation run.
///
/// Every field has a permissive default; absence of a filter option means
/// "no filtering on that axis". Loaded from an optional
/// `.gh-changelog.toml`, then overridden by CLI flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Owner of the target repository.
    pub user: Option<String>,
    /// Name of the target repository.
    pub project: Option<String>,
    /// `strftime`-style format for section dates.
    pub date_format: String,
    /// Output file path.
    pub output: PathBuf,
    /// Include closed issues.
    pub issues: bool,
    /// Also include issues carrying no label at all.
    pub add_issues_wo_labels: bool,
    /// Also include pull requests carrying no label at all.
    pub add_pr_wo_labels: bool,
    /// Include merged pull requests.
    pub pulls: bool,
    /// Use milestones to pin issues to their release tag.
    pub filter_issues_by_milestone: bool,
    /// Credit the pull-request author in each entry.
    pub author: bool,
    /// Add a section for unreleased closed issues.
    pub unreleased: bool,
    /// Heading of the unreleased section.
    pub unreleased_label: String,
    /// Add a compare link between adjacent versions.
    pub compare_link: bool,
    /// Only records carrying one of these labels are included
    /// (`None` = no include-filter).
    pub include_labels: Option<Vec<String>>,
    /// Records carrying one of these labels are always excluded.
    pub exclude_labels: Option<Vec<String>>,
    /// Cap on the number of issue records fetched from the tracker.
    pub max_issues: Option<usize>,
    /// Web URL of the GitHub host, for generated links.
    pub github_site: Option<String>,
    /// API endpoint override for GitHub Enterprise.
    pub github_endpoint: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            user: None,
            project: None,
            date_format: "%Y-%m-%d".to_owned(),
            output: PathBuf::from("CHANGELOG.md"),
            issues: true,
            add_issues_wo_labels: true,
            add_pr_wo_labels: true,
            pulls: true,
            filter_issues_by_milestone: true,
            author: true,
            unreleased: true,
            unreleased_label: "Unreleased".to_owned(),
            compare_link: true,
            include_labels: Some(vec!["bug".to_owned(), "enhancement".to_owned()]),
            exclude_labels: Some(vec![
                "duplicate".to_owned(),
                "question".to_owned(),
                "invalid".to_owned(),
                "wontfix".to_owned(),
            ]),
            max_issues: None,
            github_site: None,
            github_endpoint: None,
        }
    }
}

impl Options {
    /// Base web URL for generated links.
    pub fn site(&self) -> &str {
        self.github_site.as_deref().unwrap_or("https://github.com")
    }

    /// `{site}/{user}/{project}`, the root of all generated links.
    pub fn project_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.site(),
            self.user.as_deref().unwrap_or_default(),
            self.project.as_deref().unwrap_or_default()
        )
    }
}
