//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `$KBENCH_CONFIG` environment variable
//! 2. `~/.config/kbench/config.toml`
//! 3. Built-in defaults (everything is optional)

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use kbench_core::DEFAULT_SPREAD_THRESHOLD;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub export: ExportConfig,
}

/// Growth-classification tuning.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Max/min growth-rate ratio above which growth is flagged irregular.
    pub spread_threshold: f64,
}

/// JSON export settings for the plotting pipeline.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub pretty: bool,
    /// Default output path for `kbench export`.
    pub output: String,
}

// --- Defaults ---

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            spread_threshold: DEFAULT_SPREAD_THRESHOLD,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            output: "kbench-report.json".into(),
        }
    }
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config() -> Result<Config> {
    let path = config_path();

    if let Some(p) = &path {
        if p.exists() {
            let content =
                std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            let config: Config =
                toml::from_str(&content).with_context(|| format!("parsing {}", p.display()))?;
            return Ok(config);
        }
    }

    Ok(Config::default())
}

/// Resolve the config file path.
fn config_path() -> Option<PathBuf> {
    // 1. Environment variable
    if let Ok(p) = std::env::var("KBENCH_CONFIG") {
        return Some(PathBuf::from(p));
    }

    // 2. ~/.config/kbench/config.toml
    if let Some(home) = dirs_home() {
        let p = home.join(".config").join("kbench").join("config.toml");
        return Some(p);
    }

    None
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Show the active config path (for `kbench config`).
pub fn show_config_path() -> String {
    match config_path() {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis.spread_threshold, 10.0);
        assert!(!config.export.pretty);
        assert_eq!(config.export.output, "kbench-report.json");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[analysis]
spread_threshold = 25.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.spread_threshold, 25.0);
        // Other fields should be defaults
        assert!(!config.export.pretty);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[analysis]
spread_threshold = 5.0

[export]
pretty = true
output = "/tmp/out.json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.spread_threshold, 5.0);
        assert!(config.export.pretty);
        assert_eq!(config.export.output, "/tmp/out.json");
    }
}
