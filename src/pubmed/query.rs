//! Fielded query construction for guideline scans

use chrono::{Datelike, Utc};

/// Builds the PubMed search term for recent kidney-transplantation
/// guidance.
///
/// Three AND-ed groups: topic terms in the title, guidance signal words
/// in the title, and a publication-date window covering the target year
/// and the one before it.
#[derive(Debug, Clone)]
pub struct GuidelineQuery {
    /// Title terms naming the clinical topic
    pub topic_terms: Vec<String>,
    /// Title terms marking guidance-class articles
    pub signal_terms: Vec<String>,
    /// Publication years to include
    pub years: Vec<i32>,
}

impl GuidelineQuery {
    /// Query for a specific target year (window is year and year - 1)
    pub fn for_year(year: i32) -> Self {
        Self {
            topic_terms: vec![
                "kidney transplantation".to_string(),
                "renal transplantation".to_string(),
            ],
            signal_terms: vec![
                "guideline".to_string(),
                "consensus".to_string(),
                "recommendation".to_string(),
            ],
            years: vec![year, year - 1],
        }
    }

    /// Query for the current calendar year
    pub fn current() -> Self {
        Self::for_year(Utc::now().year())
    }

    /// Render the fielded search term.
    ///
    /// Empty queries render as an empty string so callers can skip the
    /// network round trip.
    pub fn build(&self) -> String {
        let mut groups = Vec::new();

        if let Some(group) = title_group(&self.topic_terms) {
            groups.push(group);
        }
        if let Some(group) = title_group(&self.signal_terms) {
            groups.push(group);
        }
        if !self.years.is_empty() {
            let dates: Vec<String> = self
                .years
                .iter()
                .map(|y| format!("\"{}\"[Date - Publication]", y))
                .collect();
            groups.push(format!("({})", dates.join(" OR ")));
        }

        if groups.is_empty() {
            return String::new();
        }

        format!("({})", groups.join(" AND "))
    }
}

/// OR-join terms as quoted [Title] clauses, None when empty
fn title_group(terms: &[String]) -> Option<String> {
    if terms.is_empty() {
        return None;
    }
    let clauses: Vec<String> = terms
        .iter()
        .map(|t| format!("\"{}\"[Title]", t))
        .collect();
    Some(format!("({})", clauses.join(" OR ")))
}
