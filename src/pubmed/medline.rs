//! MEDLINE flat-format parsing
//!
//! efetch with rettype=medline returns one block per article: `TAG - value`
//! lines with four-character tag fields, continuation lines indented six
//! spaces, and blank lines separating records. Only the fields the ranker
//! needs are kept; everything else is skipped tag by tag.

use crate::records::LiteratureRecord;

/// Fields extracted from one MEDLINE block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedlineRecord {
    pub pmid: Option<String>,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub publication_date: Option<String>,
}

impl MedlineRecord {
    fn is_empty(&self) -> bool {
        self.pmid.is_none()
            && self.title.is_none()
            && self.abstract_text.is_none()
            && self.publication_date.is_none()
    }

    /// Store a value for a known field, first occurrence wins.
    /// Returns false when the field was already set.
    fn set_field(&mut self, field: Field, value: String) -> bool {
        let slot = match field {
            Field::Pmid => &mut self.pmid,
            Field::Title => &mut self.title,
            Field::Abstract => &mut self.abstract_text,
            Field::Date => &mut self.publication_date,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }

    fn append_to(&mut self, field: Field, extra: &str) {
        let slot = match field {
            Field::Pmid => &mut self.pmid,
            Field::Title => &mut self.title,
            Field::Abstract => &mut self.abstract_text,
            Field::Date => &mut self.publication_date,
        };
        if let Some(value) = slot {
            value.push(' ');
            value.push_str(extra);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Pmid,
    Title,
    Abstract,
    Date,
}

fn field_for(tag: &str) -> Option<Field> {
    match tag {
        "PMID" => Some(Field::Pmid),
        "TI" => Some(Field::Title),
        "AB" => Some(Field::Abstract),
        "DP" => Some(Field::Date),
        _ => None,
    }
}

/// Parse a raw efetch MEDLINE response into records.
///
/// Malformed lines are ignored rather than failing the batch. A line
/// that opens an unknown tag also absorbs its continuation lines.
pub fn parse_medline(raw: &str) -> Vec<MedlineRecord> {
    let mut records = Vec::new();
    let mut current = MedlineRecord::default();
    let mut open_field: Option<Field> = None;

    for line in raw.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                records.push(std::mem::take(&mut current));
            }
            open_field = None;
            continue;
        }

        if let Some(rest) = line.strip_prefix("      ") {
            if let Some(field) = open_field {
                current.append_to(field, rest.trim());
            }
            continue;
        }

        let Some((tag_part, value)) = line.split_once("- ") else {
            open_field = None;
            continue;
        };
        if tag_part.len() != 4 {
            open_field = None;
            continue;
        }

        let tag = tag_part.trim_end();
        match field_for(tag) {
            Some(field) => {
                if current.set_field(field, value.trim().to_string()) {
                    open_field = Some(field);
                } else {
                    open_field = None;
                }
            }
            None => {
                open_field = None;
            }
        }
    }

    if !current.is_empty() {
        records.push(current);
    }

    records
}

impl From<MedlineRecord> for LiteratureRecord {
    fn from(medline: MedlineRecord) -> Self {
        LiteratureRecord {
            pmid: medline.pmid,
            title: medline.title.unwrap_or_default(),
            abstract_text: medline.abstract_text.unwrap_or_default(),
            publication_date: medline.publication_date.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_single_record() {
        let raw = "PMID- 39123456\n\
                   DP  - 2025 Feb 10\n\
                   TI  - KDIGO guideline on living donor evaluation.\n\
                   AB  - Updated recommendations for donor workup.\n";
        let records = parse_medline(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pmid.as_deref(), Some("39123456"));
        assert_eq!(records[0].publication_date.as_deref(), Some("2025 Feb 10"));
        assert_eq!(
            records[0].title.as_deref(),
            Some("KDIGO guideline on living donor evaluation.")
        );
    }

    #[test]
    fn test_continuation_lines_join_with_space() {
        let raw = "TI  - Robotic-assisted kidney transplantation: consensus\n\
                   \x20     statement of the working group.\n\
                   AB  - Long abstract first line\n\
                   \x20     second line\n\
                   \x20     third line.\n";
        let records = parse_medline(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].title.as_deref(),
            Some("Robotic-assisted kidney transplantation: consensus statement of the working group.")
        );
        assert_eq!(
            records[0].abstract_text.as_deref(),
            Some("Long abstract first line second line third line.")
        );
    }

    #[test]
    fn test_blank_lines_separate_records() {
        let raw = "PMID- 111\nTI  - First title.\n\nPMID- 222\nTI  - Second title.\n";
        let records = parse_medline(raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pmid.as_deref(), Some("111"));
        assert_eq!(records[1].title.as_deref(), Some("Second title."));
    }

    #[test]
    fn test_unknown_tags_absorb_continuations() {
        let raw = "TI  - Real title.\n\
                   AD  - Department of Urology, some hospital,\n\
                   \x20     some city, some country.\n";
        let records = parse_medline(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Real title."));
        assert_eq!(records[0].abstract_text, None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        // Some records carry a second TI-like field; keep the first.
        let raw = "TI  - Original title.\nTI  - Duplicate title.\n\
                   \x20     with continuation.\n";
        let records = parse_medline(raw);
        assert_eq!(records[0].title.as_deref(), Some("Original title."));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let raw = "garbage without separator\nTI  - Survivor.\nTOOLONG - nope\n";
        let records = parse_medline(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Survivor."));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_medline("").is_empty());
        assert!(parse_medline("\n\n\n").is_empty());
    }

    #[test]
    fn test_conversion_defaults_missing_fields() {
        let raw = "PMID- 333\n";
        let record: LiteratureRecord = parse_medline(raw).remove(0).into();
        assert_eq!(record.pmid.as_deref(), Some("333"));
        assert_eq!(record.title, "");
        assert_eq!(record.abstract_text, "");
    }
}
