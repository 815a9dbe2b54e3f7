use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File name marking a collection's root directory.
pub const CONFIG_FILE: &str = "collection.json";

/// Subdirectory (relative to the config) holding the documents.
pub const DOCS_DIR: &str = "docs";

/// One collection's input configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    pub persona: String,
    pub job_to_be_done: String,
    pub documents: Vec<String>,
}

pub fn load_config(path: &Path) -> Result<CollectionConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

/// Find every collection config under `root`, recursively. Sorted so
/// batch runs visit collections in a deterministic order.
pub fn discover_configs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(root, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if path.file_name().is_some_and(|n| n == CONFIG_FILE) {
            found.push(path);
        }
    }
    Ok(())
}

// ── Tests ──
