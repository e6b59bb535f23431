//! Curated evidence registry
//!
//! A small, hand-maintained set of practice-critical statements keyed by
//! clinical topic. Entries carry their citation and an evidence grade;
//! grades containing "Alert" flag safety-critical items that display
//! differently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One curated statement with its citation and grade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    /// The clinical statement itself
    pub statement: String,
    /// Citation for the statement
    pub source: String,
    /// Oxford-style grade, or "Safety Alert" for hazard notices
    pub evidence_level: String,
}

impl EvidenceEntry {
    pub fn new(
        statement: impl Into<String>,
        source: impl Into<String>,
        evidence_level: impl Into<String>,
    ) -> Self {
        Self {
            statement: statement.into(),
            source: source.into(),
            evidence_level: evidence_level.into(),
        }
    }

    /// True for entries graded as safety alerts
    pub fn is_safety_alert(&self) -> bool {
        self.evidence_level.contains("Alert")
    }
}

/// Keyed store of curated evidence entries
#[derive(Debug, Clone, Default)]
pub struct EvidenceDb {
    entries: HashMap<String, EvidenceEntry>,
}

impl EvidenceDb {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the maintained transplant entries
    pub fn builtin() -> Self {
        let mut db = Self::new();

        db.insert(
            "heparin_donor",
            EvidenceEntry::new(
                "Systemic heparinisation (3000-5000 IU) before vessel clamping \
                 reduces the risk of graft thrombosis.",
                "Cochrane Database Syst Rev. 2021; Pan et al.",
                "Level 1b",
            ),
        );
        db.insert(
            "mannitol",
            EvidenceEntry::new(
                "Mannitol given before reperfusion lowers the incidence of \
                 delayed graft function.",
                "EAU Guidelines 2025",
                "Level 2a",
            ),
        );
        db.insert(
            "rakt_safety",
            EvidenceEntry::new(
                "Robotic-assisted kidney transplantation is safe in recipients \
                 with BMI > 30 when performed at experienced centres.",
                "ERUS-RAKT Working Group; Breda et al.",
                "Level 2a",
            ),
        );
        db.insert(
            "stapler_safety",
            EvidenceEntry::new(
                "Vascular stapler malfunction during donor nephrectomy has caused \
                 fatal haemorrhage; backup clamps must be available.",
                "FDA Warning / Friedman et al.",
                "Safety Alert",
            ),
        );
        db.insert(
            "machine_perfusion",
            EvidenceEntry::new(
                "Hypothermic machine perfusion reduces delayed graft function \
                 compared with static cold storage in expanded-criteria donors.",
                "COMPARE Trial (Lancet)",
                "Level 1a",
            ),
        );
        db.insert(
            "dd_cfdna",
            EvidenceEntry::new(
                "Donor-derived cell-free DNA above 1% indicates elevated risk of \
                 active rejection and should prompt biopsy evaluation.",
                "Bloom et al.",
                "Level 2b",
            ),
        );

        db
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: EvidenceEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Look up an entry; unknown keys return None rather than erroring
    pub fn get(&self, key: &str) -> Option<&EvidenceEntry> {
        self.entries.get(key)
    }

    /// All keys in sorted order for stable listings
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entries_present() {
        let db = EvidenceDb::builtin();
        assert_eq!(db.len(), 6);
        assert!(db.get("heparin_donor").is_some());
        assert!(db.get("machine_perfusion").is_some());
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let db = EvidenceDb::builtin();
        assert!(db.get("icg_ureter").is_none());
    }

    #[test]
    fn test_safety_alert_classification() {
        let db = EvidenceDb::builtin();
        assert!(db.get("stapler_safety").unwrap().is_safety_alert());
        assert!(!db.get("mannitol").unwrap().is_safety_alert());
    }

    #[test]
    fn test_keys_are_sorted() {
        let db = EvidenceDb::builtin();
        let keys = db.keys();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(keys[0], "dd_cfdna");
    }
}
