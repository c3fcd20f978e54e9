use crate::config::Options;
use crate::generator::Section;
use crate::types::{Issue, PullRequest};

const CREDIT: &str =
    "\\* *This changelog was generated by [gh-changelog](https://github.com/graelo/gh-changelog)*\n";

/// Render the changelog sections to a Markdown document.
pub fn render(sections: &[Section], options: &Options) -> String {
    let mut out = String::from("# Change Log\n\n");
    for section in sections {
        render_section(&mut out, section, options);
    }
    out.push_str(CREDIT);
    out
}

fn render_section(out: &mut String, section: &Section, options: &Options) {
    let project_url = options.project_url();

    match &section.tag {
        Some(tag) => {
            out.push_str(&format!("## [{}]({project_url}/tree/{})", tag.name, tag.name));
            if let Some(date) = section.date {
                out.push_str(&format!(" ({})", date.format(&options.date_format)));
            }
            out.push('\n');
        }
        None => {
            out.push_str(&format!(
                "## [{}]({project_url}/tree/HEAD)\n",
                options.unreleased_label
            ));
        }
    }

    if options.compare_link
        && let Some(previous) = &section.previous_tag
    {
        let head = section.tag.as_ref().map_or("HEAD", |t| t.name.as_str());
        out.push_str(&format!(
            "\n[Full Changelog]({project_url}/compare/{}...{head})\n",
            previous.name
        ));
    }

    let enhancements: Vec<&Issue> = section
        .issues
        .iter()
        .filter(|i| i.labels.iter().any(|l| l.name == "enhancement"))
        .collect();
    let bugs: Vec<&Issue> = section
        .issues
        .iter()
        .filter(|i| {
            i.labels.iter().any(|l| l.name == "bug")
                && !i.labels.iter().any(|l| l.name == "enhancement")
        })
        .collect();
    let other: Vec<&Issue> = section
        .issues
        .iter()
        .filter(|i| !i.labels.iter().any(|l| l.name == "bug" || l.name == "enhancement"))
        .collect();

    render_issue_list(out, "**Implemented enhancements:**", &enhancements);
    render_issue_list(out, "**Fixed bugs:**", &bugs);
    render_issue_list(out, "**Closed issues:**", &other);
    render_pr_list(out, &section.pull_requests, options.author);

    out.push('\n');
}

fn render_issue_list(out: &mut String, heading: &str, issues: &[&Issue]) {
    if issues.is_empty() {
        return;
    }
    out.push_str(&format!("\n{heading}\n\n"));
    for issue in issues {
        out.push_str(&format!(
            "- {} [\\#{}]({})\n",
            issue.title, issue.number, issue.url
        ));
    }
}

fn render_pr_list(out: &mut String, pull_requests: &[PullRequest], credit_author: bool) {
    if pull_requests.is_empty() {
        return;
    }
    out.push_str("\n**Merged pull requests:**\n\n");
    for pr in pull_requests {
        out.push_str(&format!("- {} [\\#{}]({})", pr.title, pr.number, pr.url));
        if credit_author
            && let Some(author) = &pr.author
        {
            out.push_str(&format!(" ([{}]({}))", author.login, author.url));
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Actor, Label, Tag};

    fn options() -> Options {
        Options {
            user: Some("graelo".to_owned()),
            project: Some("demo".to_owned()),
            ..Options::default()
        }
    }

    fn issue(number: u64, title: &str, labels: &[&str]) -> Issue {
        Issue {
            number,
            title: title.to_owned(),
            labels: labels
                .iter()
                .map(|name| Label {
                    name: (*name).to_owned(),
                })
                .collect(),
            milestone: None,
            closed_at: None,
            author: None,
            url: format!("https://github.com/graelo/demo/issues/{number}"),
        }
    }

    fn pr(number: u64, title: &str, author: &str) -> PullRequest {
        PullRequest {
            number,
            title: title.to_owned(),
            labels: vec![],
            milestone: None,
            closed_at: None,
            merged_at: Some("2020-01-01T00:00:00Z".to_owned()),
            author: Some(Actor {
                login: author.to_owned(),
                url: format!("https://github.com/{author}"),
            }),
            url: format!("https://github.com/graelo/demo/pull/{number}"),
        }
    }

    fn tag(name: &str) -> Tag {
        Tag {
            name: name.to_owned(),
            sha: String::new(),
        }
    }

    #[test]
    fn renders_tag_heading_with_date_and_compare_link() {
        let section = Section {
            tag: Some(tag("v1.1.0")),
            previous_tag: Some(tag("v1.0.0")),
            date: Some(
                chrono::DateTime::parse_from_rfc3339("2020-02-03T10:00:00Z")
                    .unwrap()
                    .with_timezone(&chrono::Utc),
            ),
            issues: vec![issue(7, "Crash on resize", &["bug"])],
            pull_requests: vec![],
        };
        let text = render(&[section], &options());
        assert!(text.contains("## [v1.1.0](https://github.com/graelo/demo/tree/v1.1.0) (2020-02-03)"));
        assert!(
            text.contains("[Full Changelog](https://github.com/graelo/demo/compare/v1.0.0...v1.1.0)")
        );
        assert!(text.contains("**Fixed bugs:**"));
        assert!(text.contains("- Crash on resize [\\#7](https://github.com/graelo/demo/issues/7)"));
    }

    #[test]
    fn renders_unreleased_heading_against_head() {
        let section = Section {
            tag: None,
            previous_tag: Some(tag("v1.0.0")),
            date: None,
            issues: vec![issue(9, "Follow-up", &[])],
            pull_requests: vec![],
        };
        let text = render(&[section], &options());
        assert!(text.contains("## [Unreleased](https://github.com/graelo/demo/tree/HEAD)"));
        assert!(
            text.contains("[Full Changelog](https://github.com/graelo/demo/compare/v1.0.0...HEAD)")
        );
        assert!(text.contains("**Closed issues:**"));
    }

    #[test]
    fn splits_issues_into_enhancement_bug_and_other() {
        let section = Section {
            tag: Some(tag("v1.0.0")),
            previous_tag: None,
            date: None,
            issues: vec![
                issue(1, "Add search", &["enhancement"]),
                issue(2, "Fix crash", &["bug"]),
                issue(3, "Update docs", &["docs"]),
            ],
            pull_requests: vec![],
        };
        let text = render(&[section], &options());
        let enh = text.find("**Implemented enhancements:**").unwrap();
        let bugs = text.find("**Fixed bugs:**").unwrap();
        let other = text.find("**Closed issues:**").unwrap();
        assert!(enh < bugs && bugs < other);
        assert!(text.contains("- Add search [\\#1]"));
        assert!(text.contains("- Fix crash [\\#2]"));
        assert!(text.contains("- Update docs [\\#3]"));
    }

    #[test]
    fn credits_pr_author_when_enabled() {
        let section = Section {
            tag: Some(tag("v1.0.0")),
            previous_tag: None,
            date: None,
            issues: vec![],
            pull_requests: vec![pr(12, "Refactor engine", "alice")],
        };
        let text = render(&[section], &options());
        assert!(text.contains(
            "- Refactor engine [\\#12](https://github.com/graelo/demo/pull/12) ([alice](https://github.com/alice))"
        ));
    }

    #[test]
    fn omits_author_credit_when_disabled() {
        let mut opts = options();
        opts.author = false;
        let section = Section {
            tag: Some(tag("v1.0.0")),
            previous_tag: None,
            date: None,
            issues: vec![],
            pull_requests: vec![pr(12, "Refactor engine", "alice")],
        };
        let text = render(&[section], &opts);
        assert!(text.contains("- Refactor engine [\\#12](https://github.com/graelo/demo/pull/12)\n"));
        assert!(!text.contains("(alice"));
    }

    #[test]
    fn document_starts_with_title_and_ends_with_credit() {
        let text = render(&[], &options());
        assert!(text.starts_with("# Change Log\n"));
        assert!(text.ends_with("*\n"));
    }
}
