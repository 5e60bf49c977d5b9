// File: ./src/context.rs
//! Where sheetprune keeps its files.
//!
//! `config.toml` and the downloaded `credentials.json` live in the config
//! directory; the OAuth token cache and `sheetprune.log` live in the data
//! directory. `--root <dir>` swaps both for `<dir>/config` and `<dir>/data`.
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_data_dir(&self) -> Result<PathBuf>;
    fn get_config_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }

    /// OAuth client secrets, used unless `credentials_path` is configured.
    fn get_credentials_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("credentials.json"))
    }

    /// Token cache directory, used unless `token_dir` is configured.
    fn get_token_dir(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join("token"))
    }

    fn get_log_path(&self) -> Option<PathBuf> {
        self.get_data_dir().ok().map(|p| p.join("sheetprune.log"))
    }
}

fn created(path: PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create directory: {:?}", path))?;
    Ok(path)
}

/// Platform directories, or a single root given on the command line.
#[derive(Clone, Debug)]
pub struct StandardContext {
    root: Option<PathBuf>,
}

impl StandardContext {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    fn resolve(&self, under_root: &str, platform: fn(&ProjectDirs) -> &Path) -> Result<PathBuf> {
        let dir = match &self.root {
            Some(root) => root.join(under_root),
            None => ProjectDirs::from("org", "sheetprune", "sheetprune")
                .map(|proj| platform(&proj).to_path_buf())
                .ok_or_else(|| anyhow!("No home directory"))?,
        };
        created(dir)
    }
}

impl AppContext for StandardContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.resolve("data", ProjectDirs::data_dir)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.resolve("config", ProjectDirs::config_dir)
    }
}

/// Throwaway root under the system temp dir, removed on drop.
#[derive(Clone, Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("sheetprune_test_{}", uuid::Uuid::new_v4()));
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        created(self.root.join("data"))
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        created(self.root.join("config"))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
