//! Core literature record types shared across the pipeline

use serde::{Deserialize, Serialize};

/// A single literature item as fetched from a search source.
///
/// Fields mirror what PubMed reliably provides for guideline-class
/// articles. Missing metadata collapses to empty strings rather than
/// failing the whole fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteratureRecord {
    /// PubMed identifier, when the source supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,

    /// Article title as published
    pub title: String,

    /// Abstract text, empty when the article has none
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,

    /// Publication date string as reported by the source (e.g. "2025 Mar 12")
    #[serde(default)]
    pub publication_date: String,
}

impl LiteratureRecord {
    /// Create a record without a PMID
    pub fn new(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        publication_date: impl Into<String>,
    ) -> Self {
        Self {
            pmid: None,
            title: title.into(),
            abstract_text: abstract_text.into(),
            publication_date: publication_date.into(),
        }
    }
}

/// A literature record that survived exclusion filtering, with its
/// relevance score and the pipeline stage that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRecord {
    /// The underlying article
    pub record: LiteratureRecord,

    /// Keyword relevance score (0 is valid and does not disqualify)
    pub score: i32,

    /// Producer tag, e.g. "auto-agent" for scheduled scans
    pub source: String,
}
