use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default configuration file looked up when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "quilt.toml";

/// Top-level quilt configuration.
///
/// Every field has a default, so a missing config file means "all defaults".
/// CLI flags override whatever the config supplies.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuiltConfig {
    /// Dataset location and format settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Watch-loop settings.
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_var")]
    pub var: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            format: default_format(),
            var: default_var(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("outputs")
}
fn default_format() -> String {
    "csv".to_string()
}
fn default_var() -> String {
    "u".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: f64,
    #[serde(default)]
    pub redraw_same: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            redraw_same: false,
        }
    }
}

fn default_interval_secs() -> f64 {
    0.5
}

impl QuiltConfig {
    /// Load configuration.
    ///
    /// An explicit `--config` path must exist; otherwise `quilt.toml` in the
    /// working directory is used if present, and built-in defaults if not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };

        let toml_str = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}
