use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn cardex_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".cardex"))
}

pub fn ensure_cardex_home() -> Result<PathBuf> {
    let dir = cardex_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Default location for both cache files.
pub fn cache_dir() -> Result<PathBuf> {
    Ok(ensure_cardex_home()?.join("cache"))
}

pub fn schema_cache_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("schema_cache.json")
}

pub fn merchant_cache_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("merchant_cache.json")
}
