//! Result ranking for guideline scans
//!
//! Three stages: exclusion filtering drops animal studies and bare study
//! protocols, keyword scoring weights society guidelines and robotic
//! surgery work, and a stable descending sort keeps source order among
//! ties before truncating to the configured result count.

use crate::records::{LiteratureRecord, RankedRecord};

/// A group of title keywords sharing one weight.
///
/// A group contributes its weight at most once per record, no matter
/// how many of its terms match.
#[derive(Debug, Clone)]
pub struct KeywordBoost {
    /// Title substrings that trigger this boost (case-sensitive)
    pub terms: Vec<String>,
    /// Score added when any term matches
    pub weight: i32,
}

impl KeywordBoost {
    pub fn new(terms: &[&str], weight: i32) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            weight,
        }
    }
}

/// Tunable rules for exclusion and scoring
#[derive(Debug, Clone)]
pub struct RankingRules {
    /// Abstract substrings that disqualify a record (case-insensitive).
    /// "rat " keeps its trailing space so "rate" and "stratif" survive.
    pub exclude_abstract_terms: Vec<String>,
    /// Title substrings that disqualify a record (case-insensitive)
    pub exclude_title_terms: Vec<String>,
    /// Scoring groups applied to the raw title
    pub boosts: Vec<KeywordBoost>,
    /// Number of records kept after sorting
    pub top_k: usize,
}

impl Default for RankingRules {
    fn default() -> Self {
        Self {
            exclude_abstract_terms: vec![
                "rat ".to_string(),
                "murine".to_string(),
                "mouse".to_string(),
                "porcine".to_string(),
            ],
            exclude_title_terms: vec!["protocol".to_string()],
            boosts: vec![
                KeywordBoost::new(&["EAU", "European Association of Urology"], 10),
                KeywordBoost::new(&["KDIGO"], 10),
                KeywordBoost::new(&["Robotic", "RAKT"], 5),
            ],
            top_k: 3,
        }
    }
}

/// Scores and orders literature records for clinical relevance
pub struct Ranker {
    rules: RankingRules,
}

impl Ranker {
    /// Create a ranker with the default clinical rules
    pub fn new() -> Self {
        Self {
            rules: RankingRules::default(),
        }
    }

    /// Create a ranker with custom rules
    pub fn with_rules(rules: RankingRules) -> Self {
        Self { rules }
    }

    /// Access the active rules
    pub fn rules(&self) -> &RankingRules {
        &self.rules
    }

    /// True when a record trips any exclusion term.
    ///
    /// Exclusion matching is case-insensitive on both sides.
    pub fn is_excluded(&self, record: &LiteratureRecord) -> bool {
        let abstract_lower = record.abstract_text.to_lowercase();
        if self
            .rules
            .exclude_abstract_terms
            .iter()
            .any(|term| abstract_lower.contains(&term.to_lowercase()))
        {
            return true;
        }

        let title_lower = record.title.to_lowercase();
        self.rules
            .exclude_title_terms
            .iter()
            .any(|term| title_lower.contains(&term.to_lowercase()))
    }

    /// Keyword relevance score for a record.
    ///
    /// Boost terms match the raw title case-sensitively, so "EAU" does
    /// not fire on "plateau". Each group counts once.
    pub fn score(&self, record: &LiteratureRecord) -> i32 {
        self.rules
            .boosts
            .iter()
            .filter(|boost| boost.terms.iter().any(|term| record.title.contains(term.as_str())))
            .map(|boost| boost.weight)
            .sum()
    }

    /// Filter, score, sort, and truncate a candidate set.
    ///
    /// The sort is stable, so records with equal scores keep the order
    /// the source returned them in. A zero score does not disqualify.
    pub fn rank(&self, records: Vec<LiteratureRecord>, source: &str) -> Vec<RankedRecord> {
        let mut ranked: Vec<RankedRecord> = records
            .into_iter()
            .filter(|record| !self.is_excluded(record))
            .map(|record| {
                let score = self.score(&record);
                RankedRecord {
                    record,
                    score,
                    source: source.to_string(),
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(self.rules.top_k);
        ranked
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}
