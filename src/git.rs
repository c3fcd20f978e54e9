use std::path::Path;
use std::process::Command;

use thiserror::Error;

use crate::types::RepoRef;

#[derive(Debug, Error)]
#[error("cannot detect user and project from \"{input}\"")]
pub struct SlugParseError {
    pub input: String,
}

/// Parse a repository argument into a `RepoRef`.
///
/// Accepts a bare `owner/repo` slug or a full GitHub web URL such as
/// `https://github.com/owner/repo`. Host-qualified forms strip the scheme
/// and host before slug parsing, so GHE URLs work too.
pub fn parse_slug(input: &str) -> Result<RepoRef, SlugParseError> {
    let make_err = || SlugParseError {
        input: input.to_owned(),
    };

    let slug = if let Some(after_scheme) = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
    {
        after_scheme.split_once('/').ok_or_else(make_err)?.1
    } else {
        input
    };
    let slug = slug.strip_suffix(".git").unwrap_or(slug);
    let slug = slug.strip_suffix('/').unwrap_or(slug);

    RepoRef::from_full_name(slug).ok_or_else(make_err)
}

/// Detect `owner/repo` from the git remote of the directory at `path`.
///
/// Tries the `origin` remote first, falls back to the first listed remote.
/// Parses both SSH (`git@github.com:owner/repo.git`) and HTTPS
/// (`https://github.com/owner/repo.git`) URL formats.
pub fn detect_user_project(path: &Path) -> Option<RepoRef> {
    let url = remote_url(path, "origin").or_else(|| {
        let first = first_remote_name(path)?;
        remote_url(path, &first)
    })?;
    parse_remote_url(&url)
}

/// Run `git remote get-url <remote>` in the given directory.
fn remote_url(path: &Path, remote: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["remote", "get-url", remote])
        .current_dir(path)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let url = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    if url.is_empty() { None } else { Some(url) }
}

/// Return the name of the first listed remote.
fn first_remote_name(path: &Path) -> Option<String> {
    let output = Command::new("git")
        .args(["remote"])
        .current_dir(path)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()?
        .trim()
        .to_owned();
    if name.is_empty() { None } else { Some(name) }
}

/// Parse `owner/repo` from an SSH or HTTPS remote URL.
fn parse_remote_url(url: &str) -> Option<RepoRef> {
    let slug = if let Some(rest) = url.strip_prefix("git@") {
        // SSH: git@github.com:owner/repo.git
        rest.split_once(':')?.1
    } else if url.starts_with("https://") || url.starts_with("http://") {
        // HTTPS: https://github.com/owner/repo.git
        let after_scheme = url.split_once("://")?.1;
        after_scheme.split_once('/')?.1
    } else {
        return None;
    };

    let slug = slug.strip_suffix(".git").unwrap_or(slug);
    RepoRef::from_full_name(slug)
}
