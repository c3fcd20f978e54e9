use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};

use gh_changelog::config::Options;
use gh_changelog::fetcher::{Fetcher, StubFetcher};
use gh_changelog::generator;
use gh_changelog::types::{Issue, PullRequest, Tag};

fn parse_time(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid fixture timestamp")
        .with_timezone(&Utc)
}

fn load_stub() -> StubFetcher {
    let issues: Vec<Issue> = serde_json::from_str(include_str!("fixtures/issues.json"))
        .expect("valid issues.json fixture");
    let pull_requests: Vec<PullRequest> =
        serde_json::from_str(include_str!("fixtures/pull_requests.json"))
            .expect("valid pull_requests.json fixture");
    let closed_pull_requests: Vec<PullRequest> =
        serde_json::from_str(include_str!("fixtures/closed_pull_requests.json"))
            .expect("valid closed_pull_requests.json fixture");

    StubFetcher {
        issues,
        pull_requests,
        closed_pull_requests,
        // Newest first, as served by the tracker.
        tags: vec![
            Tag {
                name: "v2.0".to_owned(),
                sha: "b".repeat(40),
            },
            Tag {
                name: "v1.0".to_owned(),
                sha: "a".repeat(40),
            },
        ],
        tag_times: HashMap::from([
            ("v1.0".to_owned(), parse_time("2020-01-01T00:00:00Z")),
            ("v2.0".to_owned(), parse_time("2020-02-01T00:00:00Z")),
        ]),
    }
}

fn options() -> Options {
    Options {
        user: Some("graelo".to_owned()),
        project: Some("demo".to_owned()),
        ..Options::default()
    }
}

#[test]
fn generates_sections_per_tag_with_default_options() {
    let fetcher = load_stub();
    let text = generator::generate(&options(), &fetcher).expect("generation succeeds");

    // v2.0 window (v1.0, v2.0]: the bug issue and the merged PR.
    assert!(text.contains("## [v2.0](https://github.com/graelo/demo/tree/v2.0) (2020-02-01)"));
    assert!(text.contains("- Crash when config file is empty [\\#1]"));
    assert!(text.contains("- Rework the config loader [\\#10]"));
    assert!(text.contains("([carol](https://github.com/carol))"));

    // v1.0 window: the unlabeled issue survives via add_issues_wo_labels.
    assert!(text.contains("## [v1.0](https://github.com/graelo/demo/tree/v1.0) (2020-01-01)"));
    assert!(text.contains("- Typo in README [\\#2]"));

    // Compare link between the two releases.
    assert!(text.contains("[Full Changelog](https://github.com/graelo/demo/compare/v1.0...v2.0)"));
}

#[test]
fn milestone_pins_issue_to_its_release_tag() {
    let fetcher = load_stub();
    let text = generator::generate(&options(), &fetcher).expect("generation succeeds");

    // Issue 4 closed after v2.0, but its milestone says v1.0: it must
    // surface under v1.0 and leave the unreleased bucket empty.
    let v1_heading = text.find("## [v1.0]").expect("v1.0 section");
    let issue4 = text.find("- Add fuzzy search [\\#4]").expect("issue 4 rendered");
    assert!(issue4 > v1_heading);
    assert!(!text.contains("Unreleased"));
}

#[test]
fn excluded_and_unmerged_records_never_appear() {
    let fetcher = load_stub();
    let text = generator::generate(&options(), &fetcher).expect("generation succeeds");

    // wontfix label is excluded by default.
    assert!(!text.contains("Support ancient terminal emulators"));
    // PR 11 was closed without being merged.
    assert!(!text.contains("Experimental renderer"));
}

#[test]
fn milestone_filter_can_be_disabled() {
    let fetcher = load_stub();
    let mut opts = options();
    opts.filter_issues_by_milestone = false;
    let text = generator::generate(&opts, &fetcher).expect("generation succeeds");

    // Without the milestone reconciler, issue 4 lands in the unreleased
    // bucket by its close date.
    let unreleased = text.find("## [Unreleased]").expect("unreleased section");
    let issue4 = text.find("- Add fuzzy search [\\#4]").expect("issue 4 rendered");
    assert!(issue4 > unreleased);
    assert!(issue4 < text.find("## [v2.0]").unwrap());
}

#[test]
fn issues_and_pulls_can_be_switched_off() {
    let fetcher = load_stub();
    let mut opts = options();
    opts.issues = false;
    opts.pulls = false;
    let text = generator::generate(&opts, &fetcher).expect("generation succeeds");

    assert!(!text.contains("[\\#1]"));
    assert!(!text.contains("[\\#10]"));
    // Section headings are still rendered.
    assert!(text.contains("## [v2.0]"));
}

// ---------------------------------------------------------------------------
// Collaborator failure
// ---------------------------------------------------------------------------

/// A fetcher whose closed-PR listing always fails with a transport error.
struct BrokenFetcher(StubFetcher);

impl Fetcher for BrokenFetcher {
    fn fetch_closed_issues_and_prs(&self) -> Result<(Vec<Issue>, Vec<PullRequest>)> {
        self.0.fetch_closed_issues_and_prs()
    }

    fn fetch_closed_pull_requests(&self) -> Result<Vec<PullRequest>> {
        anyhow::bail!("transport error")
    }

    fn fetch_tags(&self) -> Result<Vec<Tag>> {
        self.0.fetch_tags()
    }

    fn tag_time(&self, tag_name: &str) -> Result<Option<DateTime<Utc>>> {
        self.0.tag_time(tag_name)
    }
}

#[test]
fn closed_pr_fetch_failure_aborts_generation() {
    let fetcher = BrokenFetcher(load_stub());
    let result = generator::generate(&options(), &fetcher);
    assert!(result.is_err());
}

#[test]
fn empty_closed_pr_list_is_not_an_error() {
    let mut fetcher = load_stub();
    fetcher.closed_pull_requests.clear();
    let text = generator::generate(&options(), &fetcher).expect("generation succeeds");
    // No PR can acquire a merge timestamp, so none survive.
    assert!(!text.contains("Merged pull requests"));
}
