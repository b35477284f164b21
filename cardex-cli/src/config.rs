use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_cardex_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmSection,
    pub ingest: IngestSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSection {
    /// Model for one-off schema inference.
    pub schema_model: String,
    /// Model for batch categorization.
    pub category_model: String,
    pub max_tokens: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSection {
    /// Uncached transactions per categorization call.
    pub batch_size: usize,
    /// Leading CSV lines shown to the schema model (plus a header line).
    pub sample_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmSection {
                schema_model: "claude-3-5-haiku-20241022".to_string(),
                category_model: "claude-haiku-4-5-20251001".to_string(),
                max_tokens: 1000,
            },
            ingest: IngestSection {
                batch_size: 20,
                sample_rows: 10,
            },
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_cardex_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.ingest.batch_size, 20);
        assert_eq!(back.llm.schema_model, cfg.llm.schema_model);
    }
}
