use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::agent::cache::{CacheConfig, DEFAULT_TTL_HOURS};
use crate::pubmed::client::{DEFAULT_TOOL, EUTILS_BASE_URL};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pubmed: PubMedConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Settings for the E-utilities client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PubMedConfig {
    /// E-utilities endpoint base
    pub base_url: String,
    /// tool parameter sent with requests
    pub tool: String,
    /// email parameter sent with requests, empty to omit
    pub email: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            base_url: EUTILS_BASE_URL.to_string(),
            tool: DEFAULT_TOOL.to_string(),
            email: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Settings for the scan cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Candidates to fetch before exclusion and ranking
    pub max_candidates: usize,
    /// Updates to keep after ranking
    pub top_k: usize,
    /// Cache freshness window in hours
    pub cache_ttl_hours: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_candidates: 10,
            top_k: 3,
            cache_ttl_hours: DEFAULT_TTL_HOURS,
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            // Create default config
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".ntxscout").join("config.toml"))
    }

    /// Cache settings derived from the scan section
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl_hours: self.scan.cache_ttl_hours,
            ..CacheConfig::default()
        }
    }
}
