use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::constants::{DEFAULT_KEYWORD, DEFAULT_TIMEOUT_MS, DEFAULT_WORKERS, MAX_RESULTS};
use crate::scanner::sanitize_token;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub run_id: String,
    pub keyword: String,
    pub workers: usize,
    pub timeout_ms: u64,
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run_id: String::new(),
            keyword: DEFAULT_KEYWORD.to_string(),
            workers: DEFAULT_WORKERS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_results: MAX_RESULTS,
        }
    }
}

impl Config {
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            bail!("workers must be at least 1");
        }
        if self.max_results == 0 {
            bail!("max_results must be at least 1");
        }
        if sanitize_token(&self.keyword).is_empty() {
            bail!("keyword {:?} has no ASCII letters", self.keyword);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub config_hash: String,
}

pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig> {
    let bytes: Vec<u8> = if let Some(p) = path {
        std::fs::read(p)?
    } else {
        include_bytes!("../config/default.yml").to_vec()
    };

    let mut config: Config = serde_yaml::from_slice(&bytes)?;
    if config.run_id.trim().is_empty() {
        config.run_id = generate_run_id();
    }
    config.validate()?;

    let config_hash = hash_bytes(&bytes);

    Ok(LoadedConfig { config, config_hash })
}

fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    hex::encode(digest)
}

fn generate_run_id() -> String {
    let now = chrono::Utc::now();
    format!("{}_{}", now.format("%Y%m%dT%H%M%SZ"), rand_suffix())
}

fn rand_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    format!("{:08x}", nanos)
}
