// File: ./src/source.rs
//! Where content files come from.
//!
//! Every data file the engine reads (season content, components, rubrics,
//! scripture books, saints) is fetched by relative path through a
//! `ContentSource`. Each fetch is an await point.

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

pub trait ContentSource: Send + Sync + std::fmt::Debug {
    /// Fetch the raw text of `path` (e.g. `season/lent.json`).
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>>;
}

pub type SharedSource = Arc<dyn ContentSource>;

/// Fetch and parse a JSON file.
pub async fn fetch_json<T: DeserializeOwned>(source: &dyn ContentSource, path: &str) -> Result<T> {
    let text = source.fetch(path).await?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path))
}

/// Reads files under a root directory.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl ContentSource for DirectorySource {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let full = self.root.join(path);
            tokio::fs::read_to_string(&full)
                .await
                .with_context(|| format!("Failed to read {}", full.display()))
        })
    }
}

/// In-memory files, for tests and embedded content.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: RwLock<HashMap<String, String>>,
    fetches: RwLock<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&self, path: impl Into<String>, contents: impl Into<String>) {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), contents.into());
        }
    }

    /// Paths fetched so far, in order. Failed fetches are included.
    pub fn fetch_log(&self) -> Vec<String> {
        self.fetches.read().map(|f| f.clone()).unwrap_or_default()
    }
}

impl ContentSource for MemorySource {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            if let Ok(mut log) = self.fetches.write() {
                log.push(path.to_string());
            }
            let files = self
                .files
                .read()
                .map_err(|_| anyhow::anyhow!("Memory source poisoned"))?;
            files
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No such file: {}", path))
        })
    }
}
