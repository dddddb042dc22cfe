//! Configuration - defaults, YAML file, environment and command line
//!
//! Layering, lowest to highest priority:
//! built-in defaults, `~/.counter-tui/config.yaml` (or `--config PATH`),
//! the `COUNTER_API_URL` environment variable, then CLI flags.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    API_URL_ENV, DEFAULT_API_URL, DEFAULT_GAME_DURATION_SECS, DEFAULT_HISTORY_LIMIT,
    DEFAULT_LOG_FILE, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TOAST_TTL_MS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub export_dir: PathBuf,
    pub history_limit: usize,
    pub game_duration_secs: u32,
    pub toast_ttl_ms: u64,
    pub request_timeout_secs: u64,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::from(DEFAULT_API_URL),
            export_dir: PathBuf::from("."),
            history_limit: DEFAULT_HISTORY_LIMIT,
            game_duration_secs: DEFAULT_GAME_DURATION_SECS,
            toast_ttl_ms: DEFAULT_TOAST_TTL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Command line flags
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub api_url: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub help: bool,
}

impl CliArgs {
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    pub fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let cli = CliArgs {
            help: args.contains(["-h", "--help"]),
            config: args.opt_value_from_str("--config")?,
            api_url: args.opt_value_from_str("--api-url")?,
            export_dir: args.opt_value_from_str("--export-dir")?,
        };

        let rest = args.finish();
        if !rest.is_empty() {
            bail!("Unexpected arguments: {:?}", rest);
        }
        Ok(cli)
    }
}

pub const USAGE: &str = "\
counter-tui - terminal client for the counter API

USAGE:
  counter-tui [--api-url URL] [--export-dir DIR] [--config FILE]

OPTIONS:
  --api-url URL      Base URL of the API (env: COUNTER_API_URL)
  --export-dir DIR   Where JSON/CSV exports are written
  --config FILE      YAML config file (default: ~/.counter-tui/config.yaml)
  -h, --help         Print this help
";

/// Default config file location
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".counter-tui")
        .join("config.yaml")
}

impl Config {
    /// Resolve the full configuration from every layer
    pub fn resolve(cli: &CliArgs) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load_file(path)?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::load_file(&path)?
                } else {
                    Config::default()
                }
            }
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.apply_api_url(url);
        }
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn apply_cli(&mut self, cli: &CliArgs) {
        if let Some(url) = &cli.api_url {
            self.apply_api_url(url.clone());
        }
        if let Some(dir) = &cli.export_dir {
            self.export_dir = dir.clone();
        }
    }

    fn apply_api_url(&mut self, url: String) {
        let trimmed = url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.api_url = trimmed.to_string();
        }
    }
}
