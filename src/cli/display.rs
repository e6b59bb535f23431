//! Terminal output formatting
//!
//! Color-coded rendering of scan reports, search results, evidence
//! badges, and health checks. Safety alerts get the loud treatment.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::agent::ScanReport;
use crate::doctor::{HealthCheck, HealthStatus};
use crate::evidence::EvidenceEntry;
use crate::records::{LiteratureRecord, RankedRecord};

const ABSTRACT_PREVIEW_CHARS: usize = 240;

/// Spinner shown while a network call is in flight
pub fn network_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Render a full scan report
pub fn print_report(report: &ScanReport) {
    if report.is_empty() {
        println!("{}", "System is current. No new guidelines found.".dimmed());
        return;
    }

    let origin = if report.from_cache { "cached" } else { "live" };
    println!(
        "{} {} update(s) from {} candidate(s) ({})",
        "Agent update:".bold().green(),
        report.updates.len(),
        report.candidates_considered,
        origin
    );
    println!();

    for update in &report.updates {
        print_update(update);
    }
}

/// Render one ranked update
pub fn print_update(update: &RankedRecord) {
    println!(
        "{} {}",
        format!("[score {}]", update.score).cyan(),
        update.record.title.bold()
    );
    if !update.record.publication_date.is_empty() {
        println!("  {}", format!("Published: {}", update.record.publication_date).dimmed());
    }
    if !update.record.abstract_text.is_empty() {
        println!("  {}", truncate(&update.record.abstract_text, ABSTRACT_PREVIEW_CHARS));
    }
    println!();
}

/// Render one ad-hoc search result
pub fn print_record(record: &LiteratureRecord) {
    if record.publication_date.is_empty() {
        println!("{}", record.title.bold());
    } else {
        println!(
            "{} {}",
            record.title.bold(),
            format!("({})", record.publication_date).dimmed()
        );
    }
    if !record.abstract_text.is_empty() {
        println!("{}", truncate(&record.abstract_text, ABSTRACT_PREVIEW_CHARS));
    }
    println!("{}", "---".dimmed());
}

/// Render a curated evidence entry, loud when it is a safety alert
pub fn print_evidence_badge(entry: &EvidenceEntry) {
    if entry.is_safety_alert() {
        println!("{} {}", "🛑 Safety:".red().bold(), entry.statement);
        println!("   {}", format!("({})", entry.source).dimmed());
    } else {
        println!("{} {}", "📚 Evidence:".blue().bold(), entry.statement);
        println!(
            "   {}",
            format!("Ref: {} ({})", entry.source, entry.evidence_level).dimmed()
        );
    }
}

/// Render doctor results with pass/warn/fail markers
pub fn print_health_checks(checks: &[HealthCheck]) {
    for check in checks {
        match &check.status {
            HealthStatus::Pass => {
                println!("{} {}", "✓".green(), check.name);
            }
            HealthStatus::Warn(msg) => {
                println!("{} {}: {}", "⚠".yellow(), check.name, msg.yellow());
            }
            HealthStatus::Fail(msg) => {
                println!("{} {}: {}", "✗".red(), check.name, msg.red());
            }
        }
    }
}

/// Char-boundary-safe truncation with ellipsis
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_long_text() {
        let out = truncate("abcdefghij", 4);
        assert_eq!(out, "abcd...");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let out = truncate("ürologie und mehr", 3);
        assert_eq!(out, "üro...");
    }
}
