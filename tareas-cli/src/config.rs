use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tareas_store::StoreConfig;

use crate::state::ensure_tareas_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    /// Project base URL, e.g. https://myproject.supabase.co
    #[serde(default)]
    pub url: String,
    /// Project API key (anon key).
    #[serde(default)]
    pub api_key: String,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_tareas_home()?.join("config.toml"))
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

/// Resolve store settings: environment variables win over config.toml.
pub fn store_config() -> Result<StoreConfig> {
    let cfg = load_config()?;
    let url = std::env::var("TAREAS_STORE_URL").unwrap_or(cfg.store.url);
    let api_key = std::env::var("TAREAS_STORE_KEY").unwrap_or(cfg.store.api_key);
    Ok(StoreConfig { url, api_key })
}
