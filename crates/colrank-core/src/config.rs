//! Project and user configuration.
//!
//! Project settings live in `.colrank/config.toml`, found by walking up from
//! the working directory. User settings live in
//! `<config_dir>/colrank/config.toml`. Both files are optional and every key
//! has a default.
//!
//! The centrality protocol constants are not configurable. They are fixed
//! in `colrank-rank` and cannot be overridden here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub graph: GraphConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Width of the `#` bar drawn for a score of 1.0.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
    /// Show at most this many ranked agents.
    #[serde(default)]
    pub top: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            top: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Include integration references in the graph report.
    #[serde(default = "default_true")]
    pub show_integration: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            show_integration: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

/// Walk up from `start` looking for a `.colrank/` directory.
#[must_use]
pub fn find_project_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".colrank"))
        .find(|candidate| candidate.is_dir())
}

/// Load `.colrank/config.toml` for the project containing `start`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(start: &Path) -> Result<ProjectConfig> {
    let Some(dir) = find_project_dir(start) else {
        return Ok(ProjectConfig::default());
    };

    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the per-user config file, if any.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("colrank/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve project + user config and the effective output mode.
///
/// # Errors
///
/// Returns an error if either config file is present but malformed.
pub fn resolve_config(start: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let project = load_project_config(start)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_json,
        user.output.as_deref(),
        env_format.as_deref(),
        std::io::stdout().is_terminal(),
    );

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output: resolved_output.to_string(),
    })
}

/// Map a configured output name onto `pretty`, `text`, or `json`.
#[must_use]
pub fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "table" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn resolve_output(
    cli_json: bool,
    user_output: Option<&str>,
    env_format: Option<&str>,
    is_tty: bool,
) -> &'static str {
    if cli_json {
        return "json";
    }

    if let Some(mode) = env_format.and_then(normalize_output_mode) {
        return mode;
    }

    if let Some(mode) = user_output.and_then(normalize_output_mode) {
        return mode;
    }

    if is_tty { "pretty" } else { "text" }
}

const fn default_true() -> bool {
    true
}

const fn default_bar_width() -> usize {
    20
}
