//! Command-line argument parsing for ntxscout
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ntxscout - Autonomous PubMed guideline scout for kidney transplantation teams
#[derive(Parser, Debug)]
#[command(name = "ntxscout")]
#[command(version = "0.2.0")]
#[command(about = "Autonomous PubMed guideline scout for kidney transplantation teams", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except final result)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan PubMed for new guideline-class publications
    Scan {
        /// Bypass the cache and query live
        #[arg(long)]
        refresh: bool,

        /// Target publication year (window is year and year - 1)
        #[arg(long)]
        year: Option<i32>,

        /// Only show updates whose title mentions these keywords
        #[arg(long, value_delimiter = ',')]
        topic: Option<Vec<String>>,
    },

    /// Run an ad-hoc PubMed search
    Search {
        /// Search term, fielded PubMed syntax allowed
        query: String,

        /// Maximum results to fetch
        #[arg(long, default_value_t = 3)]
        max: usize,
    },

    /// Show a curated evidence entry, or list all keys
    Evidence {
        /// Entry key, e.g. heparin_donor
        key: Option<String>,
    },

    /// Run system diagnostics and health checks
    Doctor,

    /// Display current configuration
    Config,

    /// Remove the cached scan report
    Clean,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show diagnostic events
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_quiet() {
        let args = Args {
            config: None,
            verbose: 0,
            quiet: true,
            command: None,
        };
        assert_eq!(args.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let args = Args {
            config: None,
            verbose: 0,
            quiet: false,
            command: None,
        };
        assert_eq!(args.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        let args = Args {
            config: None,
            verbose: 1,
            quiet: false,
            command: None,
        };
        assert_eq!(args.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_very_verbose() {
        let args = Args {
            config: None,
            verbose: 2,
            quiet: false,
            command: None,
        };
        assert_eq!(args.verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_verbosity_methods() {
        assert!(!Verbosity::Quiet.show_progress());
        assert!(Verbosity::Normal.show_progress());

        assert!(!Verbosity::Normal.show_events());
        assert!(Verbosity::Verbose.show_events());
    }
}
