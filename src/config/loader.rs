use std::path::Path;

use anyhow::{Context, Result};

use crate::config::types::Options;

/// Discover and load the options file.
///
/// Priority:
/// 1. `--config` flag (explicit path; must exist)
/// 2. `.gh-changelog.toml` in the current directory
/// 3. built-in defaults
///
/// CLI flags are applied on top by the caller and always win.
pub fn load_options(explicit_path: Option<&Path>) -> Result<Options> {
    if let Some(path) = explicit_path {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let options: Options = toml::from_str(&contents)
            .with_context(|| format!("parsing TOML from {}", path.display()))?;
        return Ok(options);
    }

    let local = Path::new(".gh-changelog.toml");
    if local.is_file() {
        let contents = std::fs::read_to_string(local)
            .with_context(|| format!("reading {}", local.display()))?;
        let options: Options = toml::from_str(&contents)
            .with_context(|| format!("parsing TOML from {}", local.display()))?;
        return Ok(options);
    }

    Ok(Options::default())
}
