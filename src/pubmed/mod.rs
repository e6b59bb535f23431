//! PubMed E-utilities access
//!
//! `query` builds the fielded guideline search term, `client` talks to
//! esearch/efetch over HTTP, and `medline` parses the flat-file records
//! efetch returns into [`LiteratureRecord`]s.

pub mod client;
pub mod medline;
pub mod query;

use async_trait::async_trait;

use crate::errors::Result;
use crate::records::LiteratureRecord;

pub use client::PubMedClient;
pub use query::GuidelineQuery;

/// Seam between the scanner and whatever serves literature.
///
/// Production uses [`PubMedClient`]; tests swap in static or failing
/// sources to exercise scan behavior offline.
#[async_trait]
pub trait LiteratureSource: Send + Sync {
    /// Run a search and return up to `max_results` records
    async fn search(&self, term: &str, max_results: usize) -> Result<Vec<LiteratureRecord>>;
}
