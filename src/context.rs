// File: ./src/context.rs
//! Where orarium keeps its files on disk.
//!
//! Two places matter: the config directory holding `config.toml`, and the
//! default content root (season files, components, bible, saints, prayers)
//! used when the config names no `data_dir`. `--root` moves both under one
//! directory; tests get a throwaway root of their own.
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";

pub trait AppContext: Send + Sync + std::fmt::Debug {
    /// Default content root. Created if absent.
    fn get_data_dir(&self) -> Result<PathBuf>;
    /// Created if absent.
    fn get_config_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join(CONFIG_FILE_NAME))
    }
}

fn created(dir: PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Cannot create directory {}", dir.display()))?;
    Ok(dir)
}

/// Per-user platform directories, or `<root>/data` and `<root>/config`
/// when a root is given on the command line.
#[derive(Clone, Debug, Default)]
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
            None => {
                let dirs = ProjectDirs::from("org", "orarium", "orarium")
                    .ok_or_else(|| anyhow!("Cannot determine a home directory for orarium"))?;
                platform(&dirs).to_path_buf()
            }
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

/// A unique directory under the system temp dir, deleted on drop.
#[derive(Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("orarium-{}", uuid::Uuid::new_v4()));
        if let Err(e) = std::fs::create_dir_all(&root) {
            panic!("cannot create test root {}: {}", root.display(), e);
        }
        Self { root }
    }

    /// Writes `contents` as this context's `config.toml`.
    pub fn write_config(&self, contents: &str) -> Result<PathBuf> {
        let path = self.get_config_file_path()?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Cannot write {}", path.display()))?;
        Ok(path)
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
