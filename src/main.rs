//! ntxscout - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

use ntxscout::{
    agent::{GuidelineScanner, ScanCache},
    cli::{display, Args, Commands},
    config::Config,
    doctor::{Doctor, HealthStatus},
    evidence::EvidenceDb,
    pubmed::{LiteratureSource, PubMedClient},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match &args.command {
        Some(Commands::Scan {
            refresh,
            year,
            topic,
        }) => {
            run_scan(&args, &config, *refresh, *year, topic.as_deref()).await?;
        }
        Some(Commands::Search { query, max }) => {
            run_search(&args, &config, query, *max).await?;
        }
        Some(Commands::Evidence { key }) => {
            show_evidence(key.as_deref());
        }
        Some(Commands::Doctor) => {
            run_doctor(config).await?;
        }
        Some(Commands::Config) => {
            show_config(&args, &config);
        }
        Some(Commands::Clean) => {
            clean_cache(&config)?;
        }
        None => {
            // No subcommand - show usage
            println!("ntxscout v0.2.0 - Kidney Transplantation Guideline Scout");
            println!("\nUsage:");
            println!("  ntxscout scan                 Scan PubMed for new guidelines");
            println!("  ntxscout scan --refresh       Scan again, bypassing the cache");
            println!("  ntxscout search <QUERY>       Ad-hoc PubMed search");
            println!("  ntxscout evidence [KEY]       Show curated evidence");
            println!("  ntxscout doctor               System health checks");
            println!("  ntxscout config               Show configuration");
            println!("  ntxscout clean                Remove the cached scan report");
            println!("\nExample:");
            println!("  ntxscout scan --topic donor,nephrectomy");
            println!();
        }
    }

    Ok(())
}

/// Wire a scanner from config with the live PubMed client
fn build_scanner(args: &Args, config: &Config) -> Result<GuidelineScanner> {
    let client = PubMedClient::from_config(&config.pubmed)?;
    let source: Arc<dyn LiteratureSource> = Arc::new(client);

    let mut scanner =
        GuidelineScanner::with_config(source, config.scan.clone(), config.cache_config());
    scanner.set_verbose(args.verbosity().show_events());

    Ok(scanner)
}

async fn run_scan(
    args: &Args,
    config: &Config,
    refresh: bool,
    year: Option<i32>,
    topic: Option<&[String]>,
) -> Result<()> {
    let scanner = build_scanner(args, config)?;

    let spinner = if args.verbosity().show_progress() {
        Some(display::network_spinner("Scanning PubMed for new guidelines..."))
    } else {
        None
    };

    let report = match (refresh, year) {
        (true, Some(y)) => {
            scanner.clear_cache()?;
            scanner.scan_for_year(y).await
        }
        (true, None) => scanner.scan_fresh().await,
        (false, Some(y)) => scanner.scan_for_year(y).await,
        (false, None) => scanner.scan().await,
    };

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match topic {
        Some(keywords) if !keywords.is_empty() => {
            let refs: Vec<&str> = keywords.iter().map(String::as_str).collect();
            let hits = report.matching_topic(&refs);

            if hits.is_empty() {
                println!("{}", "No updates match the requested topic.".dimmed());
            } else {
                println!(
                    "{} {} update(s) matching topic",
                    "Agent update:".bold().green(),
                    hits.len()
                );
                println!();
                for update in hits {
                    display::print_update(update);
                }
            }
        }
        _ => display::print_report(&report),
    }

    Ok(())
}

async fn run_search(args: &Args, config: &Config, query: &str, max: usize) -> Result<()> {
    let scanner = build_scanner(args, config)?;

    let spinner = if args.verbosity().show_progress() {
        Some(display::network_spinner("Searching PubMed..."))
    } else {
        None
    };

    let records = scanner.lookup(query, max).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if records.is_empty() {
        println!("{}", "No results.".dimmed());
        return Ok(());
    }

    println!("{} result(s) for {}\n", records.len(), query.bold());
    for record in &records {
        display::print_record(record);
    }

    Ok(())
}

fn show_evidence(key: Option<&str>) {
    let db = EvidenceDb::builtin();

    match key {
        Some(key) => match db.get(key) {
            Some(entry) => display::print_evidence_badge(entry),
            None => {
                println!("{} Unknown evidence key: {}", "⚠".yellow(), key);
                println!("\nAvailable keys:");
                for key in db.keys() {
                    println!("  • {}", key);
                }
            }
        },
        None => {
            println!("Curated evidence entries:\n");
            for key in db.keys() {
                if let Some(entry) = db.get(key) {
                    println!("{}", key.bold());
                    display::print_evidence_badge(entry);
                    println!();
                }
            }
        }
    }
}

async fn run_doctor(config: Config) -> Result<()> {
    println!("Running diagnostics...\n");

    let doctor = Doctor::new(config);
    let checks = doctor.run_diagnostics().await;

    display::print_health_checks(&checks);
    println!();

    let failed = checks
        .iter()
        .any(|check| matches!(check.status, HealthStatus::Fail(_)));

    std::process::exit(if failed { 1 } else { 0 });
}

fn show_config(args: &Args, config: &Config) {
    println!("\nntxscout Configuration\n");

    println!("PubMed:");
    println!("  Endpoint: {}", config.pubmed.base_url);
    println!("  Tool:     {}", config.pubmed.tool);
    if !config.pubmed.email.is_empty() {
        println!("  Email:    {}", config.pubmed.email);
    }
    println!("  Timeout:  {}s", config.pubmed.timeout_secs);
    println!();

    println!("Scan:");
    println!("  Max candidates: {}", config.scan.max_candidates);
    println!("  Top K:          {}", config.scan.top_k);
    println!("  Cache TTL:      {}h", config.scan.cache_ttl_hours);
    println!();

    println!("Verbosity: {}", args.verbosity().as_str());
    println!();
}

fn clean_cache(config: &Config) -> Result<()> {
    let cache = ScanCache::new(config.cache_config());
    cache.clear()?;
    println!("{} Scan cache cleared", "✓".green());
    Ok(())
}
