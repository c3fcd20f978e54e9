use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use moka::sync::Cache;
use octocrab::Octocrab;
use serde::Deserialize;

use crate::types::{Actor, Issue, Label, Milestone, PullRequest, RepoRef, Tag};

use super::interface::Fetcher;

const PER_PAGE: u8 = 100;

/// The real GitHub-backed fetcher.
///
/// Owns its own Tokio runtime so callers stay synchronous, and a small
/// cache for tag timestamps — the time-range selector resolves the same
/// tag once per adjacent window pair.
pub struct GitHubFetcher {
    rt: tokio::runtime::Runtime,
    octocrab: Octocrab,
    repo: RepoRef,
    max_issues: Option<usize>,
    tag_times: Cache<String, Option<DateTime<Utc>>>,
}

impl GitHubFetcher {
    /// Build a fetcher for `repo`, authenticating with `token`.
    ///
    /// `endpoint` overrides the API base URI for GitHub Enterprise hosts.
    pub fn new(
        repo: RepoRef,
        token: String,
        endpoint: Option<&str>,
        max_issues: Option<usize>,
    ) -> Result<Self> {
        let builder = match endpoint {
            None => Octocrab::builder().personal_token(token),
            Some(uri) => Octocrab::builder()
                .personal_token(token)
                .base_uri(uri)
                .context("setting GHE base URI")?,
        };
        let rt = tokio::runtime::Runtime::new().context("tokio runtime init")?;
        // octocrab's `build()` spawns a tower Buffer worker via `tokio::spawn`,
        // which requires an active runtime context. Build it inside the
        // fetcher's own runtime.
        let octocrab = {
            let _guard = rt.enter();
            builder.build().context("building octocrab instance")?
        };

        Ok(Self {
            rt,
            octocrab,
            repo,
            max_issues,
            tag_times: Cache::new(200),
        })
    }

    /// Page through a listing endpoint until a short page or `cap`.
    fn fetch_paged<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        state: &str,
        cap: Option<usize>,
    ) -> Result<Vec<T>> {
        #[derive(serde::Serialize)]
        struct PageParams<'a> {
            state: &'a str,
            per_page: u8,
            page: u32,
        }

        let mut out = Vec::new();
        let mut page = 1u32;
        loop {
            let params = PageParams {
                state,
                per_page: PER_PAGE,
                page,
            };
            let batch: Vec<T> = self
                .rt
                .block_on(self.octocrab.get(path, Some(&params)))
                .with_context(|| format!("GET {path} page {page}"))?;
            let batch_len = batch.len();
            out.extend(batch);

            if let Some(cap) = cap
                && out.len() >= cap
            {
                out.truncate(cap);
                break;
            }
            if batch_len < usize::from(PER_PAGE) {
                break;
            }
            page += 1;
        }
        Ok(out)
    }
}

impl Fetcher for GitHubFetcher {
    fn fetch_closed_issues_and_prs(&self) -> Result<(Vec<Issue>, Vec<PullRequest>)> {
        let path = format!("/repos/{}/{}/issues", self.repo.owner, self.repo.name);
        let records: Vec<IssueRec> = self.fetch_paged(&path, "closed", self.max_issues)?;
        tracing::debug!("closed issue records fetched: {}", records.len());

        let mut issues = Vec::new();
        let mut prs = Vec::new();
        for rec in records {
            if rec.pull_request.is_some() {
                prs.push(rec.into_pull_request());
            } else {
                issues.push(rec.into_issue());
            }
        }
        Ok((issues, prs))
    }

    fn fetch_closed_pull_requests(&self) -> Result<Vec<PullRequest>> {
        let path = format!("/repos/{}/{}/pulls", self.repo.owner, self.repo.name);
        let records: Vec<PullRec> = self.fetch_paged(&path, "closed", None)?;
        Ok(records.into_iter().map(PullRec::into_pull_request).collect())
    }

    fn fetch_tags(&self) -> Result<Vec<Tag>> {
        let path = format!("/repos/{}/{}/tags", self.repo.owner, self.repo.name);
        // The tags endpoint ignores `state`; passing it is harmless.
        let records: Vec<TagRec> = self.fetch_paged(&path, "all", None)?;
        Ok(records
            .into_iter()
            .map(|rec| Tag {
                name: rec.name,
                sha: rec.commit.sha,
            })
            .collect())
    }

    fn tag_time(&self, tag_name: &str) -> Result<Option<DateTime<Utc>>> {
        if let Some(cached) = self.tag_times.get(tag_name) {
            return Ok(cached);
        }

        let path = format!(
            "/repos/{}/{}/commits/{tag_name}",
            self.repo.owner, self.repo.name
        );
        let fetched = self
            .rt
            .block_on(self.octocrab.get::<CommitRec, _, ()>(&path, None));

        let time = match fetched {
            Ok(rec) => rec.commit.committer.map(|c| c.date),
            // An unknown tag is "unbounded on this side", not a failure.
            Err(octocrab::Error::GitHub { ref source, .. })
                if source.status_code.as_u16() == 404 =>
            {
                None
            }
            Err(e) => return Err(e).with_context(|| format!("resolving time of tag {tag_name:?}")),
        };

        self.tag_times.insert(tag_name.to_owned(), time);
        Ok(time)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct LabelRec {
    name: String,
}

#[derive(Deserialize)]
struct MilestoneRec {
    title: String,
}

#[derive(Deserialize)]
struct ActorRec {
    login: String,
    #[serde(default)]
    html_url: String,
}

/// Marker object present on issue records that are really pull requests.
#[derive(Deserialize)]
struct PullRequestMarker {}

#[derive(Deserialize)]
struct IssueRec {
    number: u64,
    title: String,
    #[serde(default)]
    labels: Vec<LabelRec>,
    milestone: Option<MilestoneRec>,
    closed_at: Option<String>,
    user: Option<ActorRec>,
    #[serde(default)]
    html_url: String,
    pull_request: Option<PullRequestMarker>,
}

#[derive(Deserialize)]
struct PullRec {
    number: u64,
    title: String,
    #[serde(default)]
    labels: Vec<LabelRec>,
    milestone: Option<MilestoneRec>,
    closed_at: Option<String>,
    merged_at: Option<String>,
    user: Option<ActorRec>,
    #[serde(default)]
    html_url: String,
}

#[derive(Deserialize)]
struct TagRec {
    name: String,
    commit: TagCommitRec,
}

#[derive(Deserialize)]
struct TagCommitRec {
    sha: String,
}

#[derive(Deserialize)]
struct CommitRec {
    commit: CommitDetailRec,
}

#[derive(Deserialize)]
struct CommitDetailRec {
    committer: Option<CommitActorRec>,
}

#[derive(Deserialize)]
struct CommitActorRec {
    date: DateTime<Utc>,
}

impl IssueRec {
    fn into_issue(self) -> Issue {
        Issue {
            number: self.number,
            title: self.title,
            labels: convert_labels(self.labels),
            milestone: self.milestone.map(|m| Milestone { title: m.title }),
            closed_at: self.closed_at,
            author: self.user.map(ActorRec::into_actor),
            url: self.html_url,
        }
    }

    fn into_pull_request(self) -> PullRequest {
        PullRequest {
            number: self.number,
            title: self.title,
            labels: convert_labels(self.labels),
            milestone: self.milestone.map(|m| Milestone { title: m.title }),
            closed_at: self.closed_at,
            // The issues listing never carries merge data; the merge
            // reconciler fills this in from the closed-PR list.
            merged_at: None,
            author: self.user.map(ActorRec::into_actor),
            url: self.html_url,
        }
    }
}

impl PullRec {
    fn into_pull_request(self) -> PullRequest {
        PullRequest {
            number: self.number,
            title: self.title,
            labels: convert_labels(self.labels),
            milestone: self.milestone.map(|m| Milestone { title: m.title }),
            closed_at: self.closed_at,
            merged_at: self.merged_at,
            author: self.user.map(ActorRec::into_actor),
            url: self.html_url,
        }
    }
}

impl ActorRec {
    fn into_actor(self) -> Actor {
        Actor {
            login: self.login,
            url: self.html_url,
        }
    }
}

fn convert_labels(labels: Vec<LabelRec>) -> Vec<Label> {
    labels.into_iter().map(|l| Label { name: l.name }).collect()
}
