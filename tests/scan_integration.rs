//! Scan cycle integration tests
//!
//! Exercises the scanner against in-memory literature sources: ranking of
//! fetched candidates, cache hits across scans, and the swallow-to-empty
//! behavior when the search backend is down.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use ntxscout::agent::{CacheConfig, GuidelineScanner, UPDATE_SOURCE};
use ntxscout::config::ScanConfig;
use ntxscout::errors::{Result, ScoutError};
use ntxscout::pubmed::LiteratureSource;
use ntxscout::records::LiteratureRecord;

/// Serves a fixed record set and counts how often it is asked
struct StaticSource {
    records: Vec<LiteratureRecord>,
    calls: AtomicUsize,
}

impl StaticSource {
    fn new(records: Vec<LiteratureRecord>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LiteratureSource for StaticSource {
    async fn search(&self, _term: &str, max_results: usize) -> Result<Vec<LiteratureRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.iter().take(max_results).cloned().collect())
    }
}

/// Always fails, like PubMed behind a captive portal
struct FailingSource;

#[async_trait]
impl LiteratureSource for FailingSource {
    async fn search(&self, _term: &str, _max_results: usize) -> Result<Vec<LiteratureRecord>> {
        Err(ScoutError::PubMedApi("service unavailable".to_string()))
    }
}

fn record(title: &str, abstract_text: &str) -> LiteratureRecord {
    LiteratureRecord::new(title, abstract_text, "2025 Mar")
}

fn sample_candidates() -> Vec<LiteratureRecord> {
    vec![
        record("Ureteric stent study protocol", ""),
        record("KDIGO guideline on transplant candidacy", "Human cohort."),
        record("Perfusion in a porcine model", "Porcine kidneys were used."),
        record("Robotic kidney transplantation consensus", "Multicentre experience."),
        record("Plain transplant recommendation", ""),
    ]
}

fn scanner_with(
    source: Arc<dyn LiteratureSource>,
    cache_dir: &TempDir,
    ttl_hours: u64,
) -> GuidelineScanner {
    let cache_config = CacheConfig {
        storage_dir: cache_dir.path().to_path_buf(),
        ttl_hours,
    };
    GuidelineScanner::with_config(source, ScanConfig::default(), cache_config)
}

#[tokio::test]
async fn test_scan_filters_ranks_and_truncates() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(StaticSource::new(sample_candidates()));
    let scanner = scanner_with(source.clone(), &dir, 12);

    let report = scanner.scan().await;

    assert_eq!(report.candidates_considered, 5);
    assert_eq!(report.updates.len(), 3);
    assert!(!report.from_cache);

    // Animal study and protocol paper are gone
    assert!(report
        .updates
        .iter()
        .all(|u| !u.record.title.contains("porcine") && !u.record.title.contains("protocol")));

    // Best first, zero-score record fills the tail
    assert_eq!(
        report.updates[0].record.title,
        "KDIGO guideline on transplant candidacy"
    );
    assert_eq!(report.updates[0].score, 10);
    assert_eq!(
        report.updates[1].record.title,
        "Robotic kidney transplantation consensus"
    );
    assert_eq!(report.updates[1].score, 5);
    assert_eq!(report.updates[2].score, 0);

    // All updates carry the agent source tag
    assert!(report.updates.iter().all(|u| u.source == UPDATE_SOURCE));
}

#[tokio::test]
async fn test_second_scan_is_served_from_cache() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(StaticSource::new(sample_candidates()));
    let scanner = scanner_with(source.clone(), &dir, 12);

    let first = scanner.scan().await;
    let second = scanner.scan().await;

    assert_eq!(source.call_count(), 1);
    assert!(!first.from_cache);
    assert!(second.from_cache);
    assert_eq!(second.id, first.id);
    assert_eq!(second.updates.len(), first.updates.len());
}

#[tokio::test]
async fn test_scan_fresh_bypasses_cache() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(StaticSource::new(sample_candidates()));
    let scanner = scanner_with(source.clone(), &dir, 12);

    scanner.scan().await;
    let refreshed = scanner.scan_fresh().await;

    assert_eq!(source.call_count(), 2);
    assert!(!refreshed.from_cache);
}

#[tokio::test]
async fn test_year_change_forces_live_query() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(StaticSource::new(sample_candidates()));
    let scanner = scanner_with(source.clone(), &dir, 12);

    let first = scanner.scan_for_year(2025).await;
    let other_year = scanner.scan_for_year(2020).await;

    assert_eq!(source.call_count(), 2);
    assert_ne!(first.query, other_year.query);
    assert!(!other_year.from_cache);
}

#[tokio::test]
async fn test_expired_cache_triggers_requery() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(StaticSource::new(sample_candidates()));
    let scanner = scanner_with(source.clone(), &dir, 0);

    scanner.scan().await;
    let second = scanner.scan().await;

    assert_eq!(source.call_count(), 2);
    assert!(!second.from_cache);
}

#[tokio::test]
async fn test_search_failure_yields_empty_report() {
    let dir = TempDir::new().unwrap();
    let scanner = scanner_with(Arc::new(FailingSource), &dir, 12);

    let report = scanner.scan().await;

    assert!(report.is_empty());
    assert_eq!(report.candidates_considered, 0);
    assert!(!report.from_cache);
}

#[tokio::test]
async fn test_search_failure_leaves_existing_cache_alone() {
    let dir = TempDir::new().unwrap();

    // Seed the cache with a good scan
    let good = Arc::new(StaticSource::new(sample_candidates()));
    let scanner = scanner_with(good, &dir, 12);
    let seeded = scanner.scan().await;
    assert!(!seeded.is_empty());

    // A failing scan for a different year must not clobber the cache
    let failing = scanner_with(Arc::new(FailingSource), &dir, 12);
    let failed = failing.scan_for_year(1999).await;
    assert!(failed.is_empty());

    let cached_again = scanner.scan().await;
    assert!(cached_again.from_cache);
    assert_eq!(cached_again.id, seeded.id);
}

#[tokio::test]
async fn test_clear_cache_forces_requery() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(StaticSource::new(sample_candidates()));
    let scanner = scanner_with(source.clone(), &dir, 12);

    scanner.scan().await;
    scanner.clear_cache().unwrap();
    let after_clear = scanner.scan().await;

    assert_eq!(source.call_count(), 2);
    assert!(!after_clear.from_cache);
}

#[tokio::test]
async fn test_lookup_swallows_failures() {
    let dir = TempDir::new().unwrap();
    let scanner = scanner_with(Arc::new(FailingSource), &dir, 12);

    let records = scanner.lookup("\"machine perfusion\"[Title]", 5).await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_topic_filter_on_report() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(StaticSource::new(vec![
        record("Living Donor Nephrectomy guideline", "Human cohort."),
        record("Recipient consensus statement", ""),
    ]));
    let scanner = scanner_with(source, &dir, 12);

    let report = scanner.scan().await;
    let hits = report.matching_topic(&["donor", "nephrectomy"]);

    assert_eq!(hits.len(), 1);
    assert!(hits[0].record.title.contains("Nephrectomy"));
}
