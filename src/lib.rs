//! ntxscout - Kidney Transplantation Guideline Scout
//!
//! Keeps transplant teams current by scanning PubMed for fresh
//! guideline-class publications, ranking them for clinical relevance,
//! and caching the result so repeated launches stay off the network.
//!
//! # Architecture
//!
//! - **pubmed**: E-utilities client, query builder, MEDLINE parsing
//! - **ranking**: exclusion filtering and keyword scoring
//! - **agent**: scan orchestration and the on-disk report cache
//! - **evidence**: curated practice-critical statements with citations

pub mod agent;
pub mod cli;
pub mod config;
pub mod doctor;
pub mod errors;
pub mod evidence;
pub mod pubmed;
pub mod ranking;
pub mod records;

// Re-export commonly used types
pub use errors::{Result, ScoutError};
pub use records::{LiteratureRecord, RankedRecord};
