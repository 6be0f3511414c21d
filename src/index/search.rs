//! Criteria-based filtering over database records.

use crate::index::NoteRecord;
use std::fmt;

/// A single search criterion.
///
/// Criteria are parsed from command-line words: `:name` matches only tags,
/// anything else matches a tag exactly or a title substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Matches records carrying the tag.
    Tag(String),
    /// Matches records carrying exactly this tag, or whose title contains the
    /// keyword (case-insensitive).
    Keyword(String),
}

impl Criterion {
    /// Parses a command-line word into a criterion.
    pub fn parse(word: &str) -> Self {
        match word.strip_prefix(':') {
            Some(tag) => Criterion::Tag(tag.to_lowercase()),
            None => Criterion::Keyword(word.to_string()),
        }
    }

    /// Returns true if the record satisfies this criterion.
    pub fn matches(&self, record: &NoteRecord) -> bool {
        match self {
            Criterion::Tag(tag) => record.has_tag(tag),
            Criterion::Keyword(word) => {
                record.has_tag(word)
                    || record.title().to_lowercase().contains(&word.to_lowercase())
            }
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Tag(tag) => write!(f, ":{}", tag),
            Criterion::Keyword(word) => write!(f, "{}", word),
        }
    }
}

/// Parses every word into a criterion.
pub fn parse_criteria<S: AsRef<str>>(words: &[S]) -> Vec<Criterion> {
    words.iter().map(|w| Criterion::parse(w.as_ref())).collect()
}

/// Returns the records matching all criteria, preserving their order.
///
/// An empty criteria list matches everything.
pub fn find<'a>(records: &'a [NoteRecord], criteria: &[Criterion]) -> Vec<&'a NoteRecord> {
    records
        .iter()
        .filter(|record| criteria.iter().all(|c| c.matches(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NoteId, Tag};
    use pretty_assertions::assert_eq;

    fn record(id: &str, title: &str, tags: &[&str]) -> NoteRecord {
        NoteRecord::new(
            id.parse::<NoteId>().unwrap(),
            title,
            tags.iter().map(|t| Tag::new(t).unwrap()),
        )
    }

    fn sample() -> Vec<NoteRecord> {
        vec![
            record("2024-01-01-000000", "Rust ownership notes", &["rust", "learning"]),
            record("2024-01-02-000000", "Grocery list", &["home"]),
            record("2024-01-03-000000", "Trusting the borrow checker", &["learning"]),
            record("2024-01-04-000000", "Weekend plans", &["home", "rust"]),
        ]
    }

    fn titles(found: &[&NoteRecord]) -> Vec<String> {
        found.iter().map(|r| r.title().to_string()).collect()
    }

    #[test]
    fn parse_distinguishes_tag_and_keyword() {
        assert_eq!(Criterion::parse(":Rust"), Criterion::Tag("rust".into()));
        assert_eq!(Criterion::parse("Rust"), Criterion::Keyword("Rust".into()));
    }

    #[test]
    fn display_roundtrips_words() {
        let words = [":home", "list"];
        let shown: Vec<String> = parse_criteria(&words).iter().map(|c| c.to_string()).collect();
        assert_eq!(shown, vec![":home", "list"]);
    }

    #[test]
    fn empty_criteria_returns_everything_in_order() {
        let records = sample();
        let found = find(&records, &[]);
        assert_eq!(found.len(), records.len());
        assert!(found.iter().zip(&records).all(|(a, b)| *a == b));
    }

    #[test]
    fn tag_criterion_matches_only_tags() {
        let records = sample();
        let found = find(&records, &parse_criteria(&[":rust"]));
        assert_eq!(titles(&found), vec!["Rust ownership notes", "Weekend plans"]);
    }

    #[test]
    fn tag_criterion_ignores_titles() {
        let records = sample();
        let found = find(&records, &parse_criteria(&[":grocery"]));
        assert!(found.is_empty());
    }

    #[test]
    fn keyword_matches_title_substring_case_insensitively() {
        let records = sample();
        let found = find(&records, &parse_criteria(&["RUST"]));
        // "Trusting" contains "rust"; "Weekend plans" is only tagged rust
        assert_eq!(
            titles(&found),
            vec!["Rust ownership notes", "Trusting the borrow checker"]
        );
    }

    #[test]
    fn keyword_matches_tags_exactly_as_typed() {
        let records = sample();
        let found = find(&records, &parse_criteria(&["rust"]));
        assert_eq!(
            titles(&found),
            vec![
                "Rust ownership notes",
                "Trusting the borrow checker",
                "Weekend plans"
            ]
        );

        let found = find(&records, &parse_criteria(&["Home"]));
        assert!(found.is_empty());
    }

    #[test]
    fn keyword_matches_exact_tag() {
        let records = sample();
        let found = find(&records, &parse_criteria(&["home"]));
        assert_eq!(titles(&found), vec!["Grocery list", "Weekend plans"]);
    }

    #[test]
    fn keyword_does_not_match_partial_tag() {
        let records = sample();
        let found = find(&records, &parse_criteria(&["learn"]));
        assert!(found.is_empty());
    }

    #[test]
    fn criteria_are_anded() {
        let records = sample();
        let found = find(&records, &parse_criteria(&[":learning", "borrow"]));
        assert_eq!(titles(&found), vec!["Trusting the borrow checker"]);

        let found = find(&records, &parse_criteria(&[":home", ":learning"]));
        assert!(found.is_empty());
    }
}
