//! Target grades and display settings.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A final grade to compute the required rate for, e.g. `A=90`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Short label shown next to the rate (e.g. "A").
    pub label: String,
    /// Cumulative percentage to reach.
    pub percentage: f64,
}

impl Target {
    pub fn new(label: impl Into<String>, percentage: f64) -> Self {
        Self {
            label: label.into(),
            percentage,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.label, self.percentage)
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, pct) = s
            .split_once('=')
            .ok_or_else(|| format!("expected LABEL=PERCENT, got: {s}"))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(format!("missing target label: {s}"));
        }
        let percentage: f64 = pct
            .trim()
            .parse()
            .map_err(|_| format!("invalid target percentage: {}", pct.trim()))?;
        if !(0.0..=100.0).contains(&percentage) {
            return Err(format!("target percentage out of range: {percentage}"));
        }
        Ok(Target::new(label, percentage))
    }
}

/// Top-level gradetrend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeTrendConfig {
    /// Targets reported for every course, in display order.
    #[serde(default = "default_targets")]
    pub targets: Vec<Target>,
    /// Decimal places for percentages in text output.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_targets() -> Vec<Target> {
    vec![Target::new("D", 50.0), Target::new("A", 90.0)]
}
fn default_precision() -> usize {
    1
}

impl Default for GradeTrendConfig {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            precision: default_precision(),
        }
    }
}

/// Parse a comma-separated target list such as `D=50,A=90`.
pub fn parse_targets(s: &str) -> Result<Vec<Target>> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
        .collect()
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `gradetrend.toml` in the current directory
/// 2. `~/.config/gradetrend/config.toml`
///
/// Environment variable override: `GRADETREND_TARGETS`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradeTrendConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradetrend.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradeTrendConfig::default(),
    };

    if let Ok(targets) = std::env::var("GRADETREND_TARGETS") {
        config.targets =
            parse_targets(&targets).context("invalid GRADETREND_TARGETS override")?;
    }

    Ok(config)
}

/// Parse and check a config document.
pub fn parse_config_str(content: &str) -> Result<GradeTrendConfig> {
    let config: GradeTrendConfig = toml::from_str(content)?;
    for target in &config.targets {
        if !(0.0..=100.0).contains(&target.percentage) {
            anyhow::bail!("target {} is outside 0-100", target);
        }
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradetrend"))
}
