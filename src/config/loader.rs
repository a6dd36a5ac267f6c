//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TablescopeError, TablescopeResult};

use super::types::{ColorMode, Config};

/// Project-level config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".tablescope.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> TablescopeResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

pub(crate) fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> TablescopeResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| TablescopeError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the first config found (project, then user) and apply environment
/// overrides. Unknown keys in the loaded file come back as warnings; a file
/// that fails to parse is skipped with a logged warning.
pub fn load_or_default(project_root: Option<&Path>) -> (Config, Vec<ConfigWarning>) {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_with_warnings(&path) {
            Ok((config, warnings)) => {
                tracing::debug!(file = %path.display(), "loaded config");
                return (with_env_overrides(config), warnings);
            }
            Err(err) => tracing::warn!(file = %path.display(), error = %err, "ignoring config"),
        }
    }

    (with_env_overrides(Config::default()), Vec::new())
}

/// `<config dir>/tablescope/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tablescope").join("config.toml"))
}

/// Apply environment variable overrides (TABLESCOPE_* prefix)
fn with_env_overrides(config: Config) -> Config {
    apply_env(config, |key| std::env::var(key).ok())
}

fn apply_env(mut config: Config, get_env: impl Fn(&str) -> Option<String>) -> Config {
    // TABLESCOPE_PAGE_SIZE
    if let Some(size) = get_env("TABLESCOPE_PAGE_SIZE") {
        match size.trim().parse::<usize>() {
            Ok(size) if size > 0 => config.explorer.page_size = size,
            _ => tracing::warn!(value = %size, "ignoring invalid TABLESCOPE_PAGE_SIZE"),
        }
    }

    // TABLESCOPE_MAX_LEAF_CHARS
    if let Some(max) = get_env("TABLESCOPE_MAX_LEAF_CHARS") {
        match max.trim().parse::<usize>() {
            Ok(max) => config.explorer.max_leaf_chars = max,
            Err(_) => tracing::warn!(value = %max, "ignoring invalid TABLESCOPE_MAX_LEAF_CHARS"),
        }
    }

    // TABLESCOPE_COLOR
    if let Some(color) = get_env("TABLESCOPE_COLOR") {
        config.output.color = match color.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "explorer",
        "page_size",
        "max_leaf_chars",
        "default_expanded",
        "output",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
pub(crate) fn apply_env_for_test(
    config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    apply_env(config, get_env)
}
