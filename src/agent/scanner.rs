//! Autonomous guideline scanner
//!
//! Orchestrates one scan cycle: build the query, check the cache, run
//! the literature search, rank the candidates, persist the report. The
//! scanner is deliberately forgiving: a failed search yields an empty
//! report instead of an error so a flaky network never breaks callers.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent::cache::{CacheConfig, ScanCache};
use crate::config::ScanConfig;
use crate::pubmed::{GuidelineQuery, LiteratureSource};
use crate::ranking::{Ranker, RankingRules};
use crate::records::{LiteratureRecord, RankedRecord};

/// Source tag stamped on updates produced by scheduled scans
pub const UPDATE_SOURCE: &str = "auto-agent";

/// Outcome of one scan cycle, also the cache payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Unique report id
    pub id: String,
    /// The search term that produced this report
    pub query: String,
    /// When the candidates were fetched
    pub fetched_at: DateTime<Utc>,
    /// Candidate count before exclusion and truncation
    pub candidates_considered: usize,
    /// Ranked updates, best first, at most top_k entries
    pub updates: Vec<RankedRecord>,
    /// True when this report was served from the cache
    #[serde(default)]
    pub from_cache: bool,
}

impl ScanReport {
    /// Report with no updates, used for failed or empty searches
    pub fn empty(query: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            query,
            fetched_at: Utc::now(),
            candidates_considered: 0,
            updates: Vec::new(),
            from_cache: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Updates whose title mentions any of the given keywords,
    /// case-insensitively. Used to surface scan results next to a
    /// specific clinical topic.
    pub fn matching_topic(&self, keywords: &[&str]) -> Vec<&RankedRecord> {
        let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        self.updates
            .iter()
            .filter(|update| {
                let title = update.record.title.to_lowercase();
                lowered.iter().any(|k| title.contains(k))
            })
            .collect()
    }
}

/// Scans PubMed for fresh kidney-transplantation guidance
pub struct GuidelineScanner {
    source: Arc<dyn LiteratureSource>,
    ranker: Ranker,
    cache: ScanCache,
    config: ScanConfig,
    verbose: bool,
}

impl GuidelineScanner {
    /// Scanner with default scan and cache settings
    pub fn new(source: Arc<dyn LiteratureSource>) -> Self {
        Self::with_config(source, ScanConfig::default(), CacheConfig::default())
    }

    /// Scanner with explicit scan and cache settings
    pub fn with_config(
        source: Arc<dyn LiteratureSource>,
        config: ScanConfig,
        cache_config: CacheConfig,
    ) -> Self {
        let rules = RankingRules {
            top_k: config.top_k,
            ..RankingRules::default()
        };
        Self {
            source,
            ranker: Ranker::with_rules(rules),
            cache: ScanCache::new(cache_config),
            config,
            verbose: false,
        }
    }

    /// Enable diagnostic output on stderr
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn cache(&self) -> &ScanCache {
        &self.cache
    }

    /// Scan for the current calendar year, honoring the cache
    pub async fn scan(&self) -> ScanReport {
        self.scan_for_year(Utc::now().year()).await
    }

    /// Scan for a specific target year, honoring the cache.
    ///
    /// A cached report is only served when its query matches the one
    /// this scan would run, so a changed year window forces a live
    /// search.
    pub async fn scan_for_year(&self, year: i32) -> ScanReport {
        let query = GuidelineQuery::for_year(year).build();

        if let Some(report) = self.cache.load() {
            if report.query == query {
                if self.verbose {
                    eprintln!("[SCAN] Using cached scan from {}", report.fetched_at);
                }
                return report;
            }
        }

        self.scan_query(query).await
    }

    /// Drop any cached report and scan the current year live
    pub async fn scan_fresh(&self) -> ScanReport {
        if let Err(e) = self.cache.clear() {
            if self.verbose {
                eprintln!("[SCAN] Could not clear cache: {}", e);
            }
        }
        let query = GuidelineQuery::current().build();
        self.scan_query(query).await
    }

    /// Remove the cached report without scanning
    pub fn clear_cache(&self) -> anyhow::Result<()> {
        self.cache.clear()
    }

    /// Ad-hoc literature lookup outside the guideline query.
    ///
    /// Shares the scan failure policy: errors collapse to an empty list.
    pub async fn lookup(&self, query: &str, max_results: usize) -> Vec<LiteratureRecord> {
        match self.source.search(query, max_results).await {
            Ok(records) => records,
            Err(e) => {
                if self.verbose {
                    eprintln!("[SCAN] Search unavailable: {}", e);
                }
                Vec::new()
            }
        }
    }

    /// Run the search and build a fresh report.
    ///
    /// On search failure the cache is left untouched so an older report
    /// can still be served once its query matches again.
    async fn scan_query(&self, query: String) -> ScanReport {
        if self.verbose {
            eprintln!("[SCAN] Querying PubMed: {}", query);
        }

        let candidates = match self.source.search(&query, self.config.max_candidates).await {
            Ok(records) => records,
            Err(e) => {
                if self.verbose {
                    eprintln!("[SCAN] Search unavailable: {}", e);
                }
                return ScanReport::empty(query);
            }
        };

        let candidates_considered = candidates.len();
        let updates = self.ranker.rank(candidates, UPDATE_SOURCE);

        let report = ScanReport {
            id: Uuid::new_v4().to_string(),
            query,
            fetched_at: Utc::now(),
            candidates_considered,
            updates,
            from_cache: false,
        };

        if let Err(e) = self.cache.store(&report) {
            if self.verbose {
                eprintln!("[SCAN] Could not cache report: {}", e);
            }
        }

        report
    }
}
