use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use gh_changelog::config::{Options, loader};
use gh_changelog::fetcher::GitHubFetcher;
use gh_changelog::generator;
use gh_changelog::git;

#[derive(Parser)]
#[command(
    name = "gh-changelog",
    version,
    about = "Generate a changelog from closed issues and merged pull requests"
)]
struct Cli {
    /// `owner/repo` slug or GitHub URL. Detected from the git remote when
    /// omitted.
    #[arg(value_name = "REPOSITORY")]
    repository: Option<String>,

    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// GitHub token. Falls back to GH_TOKEN / GITHUB_TOKEN.
    #[arg(short, long)]
    token: Option<String>,

    /// Output file. Default is CHANGELOG.md.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only include records with these labels (comma-separated).
    #[arg(long, value_delimiter = ',')]
    include_labels: Option<Vec<String>>,

    /// Always exclude records with these labels (comma-separated).
    #[arg(long, value_delimiter = ',')]
    exclude_labels: Option<Vec<String>>,

    /// Leave out closed issues.
    #[arg(long)]
    no_issues: bool,

    /// Leave out issues without labels.
    #[arg(long)]
    no_issues_wo_labels: bool,

    /// Leave out pull requests without labels.
    #[arg(long)]
    no_pr_wo_labels: bool,

    /// Leave out merged pull requests.
    #[arg(long)]
    no_pull_requests: bool,

    /// Do not use milestones to pin issues to their release tag.
    #[arg(long)]
    no_filter_by_milestone: bool,

    /// Do not credit pull-request authors.
    #[arg(long)]
    no_author: bool,

    /// Leave out the unreleased section.
    #[arg(long)]
    no_unreleased: bool,

    /// Heading of the unreleased section.
    #[arg(long)]
    unreleased_label: Option<String>,

    /// Leave out the Full Changelog compare links.
    #[arg(long)]
    no_compare_link: bool,

    /// Max number of issue records to fetch. Default is unlimited.
    #[arg(long)]
    max_issues: Option<usize>,

    /// API endpoint of a GitHub Enterprise host.
    #[arg(long)]
    github_endpoint: Option<String>,

    /// Web URL of a GitHub Enterprise host, for generated links.
    #[arg(long)]
    github_site: Option<String>,

    /// Date format for section headings. Default is %Y-%m-%d.
    #[arg(long)]
    date_format: Option<String>,

    /// Log progress to stderr.
    #[arg(long)]
    verbose: bool,
}

/// Overlay CLI flags on the loaded options. Flags always win.
fn apply_cli(options: &mut Options, cli: &Cli) {
    if let Some(labels) = &cli.include_labels {
        options.include_labels = Some(labels.clone());
    }
    if let Some(labels) = &cli.exclude_labels {
        options.exclude_labels = Some(labels.clone());
    }
    if let Some(output) = &cli.output {
        options.output = output.clone();
    }
    if let Some(label) = &cli.unreleased_label {
        options.unreleased_label = label.clone();
    }
    if let Some(format) = &cli.date_format {
        options.date_format = format.clone();
    }
    if let Some(max) = cli.max_issues {
        options.max_issues = Some(max);
    }
    if let Some(endpoint) = &cli.github_endpoint {
        options.github_endpoint = Some(endpoint.clone());
    }
    if let Some(site) = &cli.github_site {
        options.github_site = Some(site.clone());
    }
    if cli.no_issues {
        options.issues = false;
    }
    if cli.no_issues_wo_labels {
        options.add_issues_wo_labels = false;
    }
    if cli.no_pr_wo_labels {
        options.add_pr_wo_labels = false;
    }
    if cli.no_pull_requests {
        options.pulls = false;
    }
    if cli.no_filter_by_milestone {
        options.filter_issues_by_milestone = false;
    }
    if cli.no_author {
        options.author = false;
    }
    if cli.no_unreleased {
        options.unreleased = false;
    }
}

/// Resolve a GitHub auth token.
///
/// Priority: `--token` flag, then `GH_TOKEN`, then `GITHUB_TOKEN`.
fn resolve_token(flag: Option<&str>) -> Result<String> {
    if let Some(token) = flag
        && !token.is_empty()
    {
        return Ok(token.to_owned());
    }
    for var in ["GH_TOKEN", "GITHUB_TOKEN"] {
        if let Ok(token) = std::env::var(var)
            && !token.is_empty()
        {
            return Ok(token);
        }
    }
    bail!("no GitHub token found. Pass --token or set GH_TOKEN / GITHUB_TOKEN.")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing. `--verbose` raises the default level; RUST_LOG wins.
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut options = loader::load_options(cli.config.as_deref())?;
    apply_cli(&mut options, &cli);

    // Resolve the target repository: explicit argument, config file, or the
    // git remote of the working directory.
    let repo = match &cli.repository {
        Some(input) => git::parse_slug(input)?,
        None => match (&options.user, &options.project) {
            (Some(user), Some(project)) => gh_changelog::types::RepoRef {
                owner: user.clone(),
                name: project.clone(),
            },
            _ => {
                let cwd = std::env::current_dir().context("reading working directory")?;
                git::detect_user_project(&cwd).context(
                    "cannot detect user and project; pass an `owner/repo` argument",
                )?
            }
        },
    };
    options.user = Some(repo.owner.clone());
    options.project = Some(repo.name.clone());
    tracing::info!("generating changelog for {}", repo.full_name());

    let token = resolve_token(cli.token.as_deref())?;

    // Install the rustls CryptoProvider before any TLS client is constructed.
    // reqwest 0.13 / rustls 0.23 no longer auto-installs a provider.
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install default CryptoProvider"))?;

    let fetcher = GitHubFetcher::new(
        repo,
        token,
        options.github_endpoint.as_deref(),
        options.max_issues,
    )?;

    let changelog = generator::generate(&options, &fetcher)?;

    std::fs::write(&options.output, changelog)
        .with_context(|| format!("writing {}", options.output.display()))?;
    tracing::info!("wrote {}", options.output.display());
    println!("Changelog written to {}", options.output.display());

    Ok(())
}
