// File: ./src/config.rs
// Handles configuration loading and defaults.
use crate::context::AppContext;
use anyhow::{Error, Result};
use log::LevelFilter;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

fn default_spreadsheet_id() -> String {
    "1wDYeOv5YQaYnhoa496o3SD8KjP-TJrNrbukuA6MWpKY".to_string()
}
fn default_range() -> String {
    "Sheet3!A1:E500".to_string()
}
fn default_callback_port() -> u16 {
    8881
}
fn default_application_name() -> String {
    format!("sheetprune/{}", env!("CARGO_PKG_VERSION"))
}
fn default_api_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}
fn default_retention_days() -> u32 {
    3
}
fn default_demo_rows() -> usize {
    500
}
fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_spreadsheet_id")]
    pub spreadsheet_id: String,
    /// A1 range every read, write and clear targets.
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    #[serde(default)]
    pub token_dir: Option<PathBuf>,
    #[serde(default = "default_callback_port")]
    pub callback_port: u16,
    #[serde(default = "default_application_name")]
    pub application_name: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    #[serde(default = "default_demo_rows")]
    pub demo_rows: usize,

    #[serde(default = "default_log_level")]
    pub log_level: String, // off, error, warn, info, debug, trace
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_id: default_spreadsheet_id(),
            range: default_range(),
            credentials_path: None,
            token_dir: None,
            callback_port: default_callback_port(),
            application_name: default_application_name(),
            api_base_url: default_api_base_url(),
            retention_days: default_retention_days(),
            demo_rows: default_demo_rows(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like [`Config::load`], but falls back to defaults when no config file exists.
    /// Unreadable or malformed files are still reported.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    pub fn credentials_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.credentials_path {
            Some(p) => Ok(p.clone()),
            None => ctx.get_credentials_path(),
        }
    }

    pub fn token_dir(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.token_dir {
            Some(p) => Ok(p.clone()),
            None => ctx.get_token_dir(),
        }
    }

    /// Parsed `log_level`; unknown values fall back to `Info`.
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
