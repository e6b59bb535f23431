//! Disk cache for scan reports
//!
//! One JSON file under the storage directory holds the most recent scan.
//! A cached report is served only while fresh; stale, missing, or
//! unreadable files all count as a miss so the scanner falls through to
//! a live query.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::agent::scanner::ScanReport;

/// File name of the persisted report inside the storage directory
pub const CACHE_FILE: &str = "last_scan.json";

/// Default freshness window in hours
pub const DEFAULT_TTL_HOURS: u64 = 12;

/// Where and for how long scan reports are cached
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Directory holding the cache file
    pub storage_dir: PathBuf,
    /// Freshness window; reports older than this are misses
    pub ttl_hours: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            storage_dir: home.join(".ntxscout").join("cache"),
            ttl_hours: DEFAULT_TTL_HOURS,
        }
    }
}

/// Load/store interface over the single-report disk cache
pub struct ScanCache {
    config: CacheConfig,
}

impl ScanCache {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Path of the cache file
    pub fn cache_path(&self) -> PathBuf {
        self.config.storage_dir.join(CACHE_FILE)
    }

    /// Load the cached report if present, parseable, and fresh.
    ///
    /// The returned report is marked `from_cache` so downstream display
    /// can say where it came from.
    pub fn load(&self) -> Option<ScanReport> {
        let raw = fs::read_to_string(self.cache_path()).ok()?;
        let mut report: ScanReport = serde_json::from_str(&raw).ok()?;
        if !self.is_fresh(&report) {
            return None;
        }
        report.from_cache = true;
        Some(report)
    }

    /// Persist a report, creating the storage directory as needed
    pub fn store(&self, report: &ScanReport) -> Result<()> {
        fs::create_dir_all(&self.config.storage_dir).with_context(|| {
            format!(
                "Failed to create cache directory: {}",
                self.config.storage_dir.display()
            )
        })?;
        let json =
            serde_json::to_string_pretty(report).context("Failed to serialize scan report")?;
        fs::write(self.cache_path(), json).with_context(|| {
            format!("Failed to write cache file: {}", self.cache_path().display())
        })?;
        Ok(())
    }

    /// Remove the cache file if it exists
    pub fn clear(&self) -> Result<()> {
        let path = self.cache_path();
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove cache file: {}", path.display()))?;
        }
        Ok(())
    }

    fn is_fresh(&self, report: &ScanReport) -> bool {
        let age = chrono::Utc::now().signed_duration_since(report.fetched_at);
        age < chrono::Duration::hours(self.config.ttl_hours as i64)
    }
}
