//! Doctor command for system diagnostics
//!
//! Checks the pieces a scan depends on: the E-utilities endpoint, the
//! config file, and the cache directory.

use std::fs;

use crate::agent::cache::ScanCache;
use crate::config::Config;
use crate::pubmed::PubMedClient;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
}

impl Doctor {
    /// Create a new doctor instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = Vec::new();

        checks.push(self.check_eutils().await);
        checks.push(self.check_config_file());
        checks.push(self.check_cache_dir());
        checks.push(self.check_cache_state());

        checks
    }

    /// Check 1: E-utilities endpoint reachable
    async fn check_eutils(&self) -> HealthCheck {
        let name = "PubMed E-utilities".to_string();

        let client = match PubMedClient::from_config(&self.config.pubmed) {
            Ok(client) => client,
            Err(e) => {
                return HealthCheck {
                    name,
                    status: HealthStatus::Fail(format!("Could not build HTTP client: {}", e)),
                }
            }
        };

        match client.health_check().await {
            Ok(true) => HealthCheck {
                name,
                status: HealthStatus::Pass,
            },
            Ok(false) => HealthCheck {
                name,
                status: HealthStatus::Fail("E-utilities endpoint not reachable".to_string()),
            },
            Err(e) => HealthCheck {
                name,
                status: HealthStatus::Fail(format!("Error contacting E-utilities: {}", e)),
            },
        }
    }

    /// Check 2: Config file present and parseable
    fn check_config_file(&self) -> HealthCheck {
        let name = "Config file".to_string();

        let path = match Config::config_path() {
            Ok(path) => path,
            Err(e) => {
                return HealthCheck {
                    name,
                    status: HealthStatus::Fail(format!("Cannot resolve config path: {}", e)),
                }
            }
        };

        if !path.exists() {
            return HealthCheck {
                name,
                status: HealthStatus::Warn(format!(
                    "No config at {}, using defaults",
                    path.display()
                )),
            };
        }

        match Config::load_from(&path) {
            Ok(_) => HealthCheck {
                name,
                status: HealthStatus::Pass,
            },
            Err(e) => HealthCheck {
                name,
                status: HealthStatus::Fail(format!("Config unreadable: {}", e)),
            },
        }
    }

    /// Check 3: Cache directory writable
    fn check_cache_dir(&self) -> HealthCheck {
        let name = "Cache directory".to_string();
        let cache_config = self.config.cache_config();

        match fs::create_dir_all(&cache_config.storage_dir) {
            Ok(()) => HealthCheck {
                name,
                status: HealthStatus::Pass,
            },
            Err(e) => HealthCheck {
                name,
                status: HealthStatus::Fail(format!(
                    "Cannot create {}: {}",
                    cache_config.storage_dir.display(),
                    e
                )),
            },
        }
    }

    /// Check 4: Fresh scan report cached
    fn check_cache_state(&self) -> HealthCheck {
        let name = "Scan cache".to_string();
        let cache = ScanCache::new(self.config.cache_config());

        match cache.load() {
            Some(report) => HealthCheck {
                name,
                status: if report.is_empty() {
                    HealthStatus::Warn("Cached scan holds no updates".to_string())
                } else {
                    HealthStatus::Pass
                },
            },
            None => HealthCheck {
                name,
                status: HealthStatus::Warn("No fresh scan cached, next scan hits the network".to_string()),
            },
        }
    }
}
