//! Case-insensitive tag type for categorizing notes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A case-insensitive tag for categorizing notes.
///
/// Tags are flat labels. They are normalized to lowercase internally, making
/// `Draft`, `draft`, and `DRAFT` equivalent.
///
/// Apart from case, a tag is kept exactly as written: punctuation, path
/// separators, tabs and non-ASCII text are all allowed.
///
/// # Validation Rules
/// - Non-empty
/// - No spaces or line breaks (tags are space-separated on one header line)
///
/// # Examples
///
/// ```
/// use quill::domain::Tag;
///
/// let tag = Tag::new("Draft").unwrap();
/// assert_eq!(tag.as_str(), "draft");
///
/// // Case-insensitive equality
/// let tag2 = Tag::new("DRAFT").unwrap();
/// assert_eq!(tag, tag2);
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(String); // Always stored lowercase

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a new Tag from a string.
    ///
    /// The input is lowercased and otherwise taken verbatim.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if:
    /// - The tag is empty
    /// - The tag contains a space or a line break
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let normalized = s.to_lowercase();

        if normalized.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        if normalized.contains([' ', '\n']) {
            return Err(ParseTagError(format!(
                "invalid tag {:?}: tags cannot contain spaces or line breaks",
                normalized
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized tag value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tag::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn new_with_valid_tag() {
        let tag = Tag::new("draft").unwrap();
        assert_eq!(tag.to_string(), "draft");
    }

    #[test]
    fn new_rejects_empty_string() {
        assert!(Tag::new("").is_err());
    }

    #[test]
    fn new_rejects_spaces_and_line_breaks() {
        assert!(Tag::new("   ").is_err());
        assert!(Tag::new("a\nb").is_err());
    }

    #[test]
    fn normalizes_to_lowercase() {
        assert_eq!(Tag::new("NeedsReview").unwrap().as_str(), "needsreview");
    }

    #[test]
    fn keeps_tabs_verbatim() {
        assert_eq!(Tag::new("x\ty").unwrap().as_str(), "x\ty");
        assert_eq!(Tag::new("draft\t").unwrap().as_str(), "draft\t");
    }

    #[test]
    fn allows_punctuation_and_unicode() {
        assert!(Tag::new("c++").is_ok());
        assert!(Tag::new("to-do_later").is_ok());
        assert_eq!(Tag::new("Über").unwrap().as_str(), "über");
    }

    #[test]
    fn rejects_inner_spaces() {
        assert!(Tag::new("needs review").is_err());
    }

    #[test]
    fn keeps_path_separators() {
        assert_eq!(Tag::new("C/C++").unwrap().as_str(), "c/c++");
        assert_eq!(Tag::new("a\\b").unwrap().as_str(), "a\\b");
        assert_eq!(Tag::new("..").unwrap().as_str(), "..");
    }

    #[test]
    fn hashset_deduplicates_case_variants() {
        let mut set = HashSet::new();
        set.insert(Tag::new("draft").unwrap());
        set.insert(Tag::new("Draft").unwrap());
        set.insert(Tag::new("DRAFT").unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn ordered_sets_sort_lexicographically() {
        let set: BTreeSet<Tag> = ["rust", "B", "a"]
            .iter()
            .map(|s| Tag::new(s).unwrap())
            .collect();
        let names: Vec<_> = set.iter().map(Tag::as_str).collect();
        assert_eq!(names, vec!["a", "b", "rust"]);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Tag::new("draft").unwrap()), "Tag(\"draft\")");
    }

    #[test]
    fn parse_error_display() {
        let err = "".parse::<Tag>().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn serde_normalizes_on_deserialize() {
        let tag: Tag = serde_json::from_str(r#""DRAFT""#).unwrap();
        assert_eq!(tag.as_str(), "draft");
    }

    #[test]
    fn serde_rejects_invalid_on_deserialize() {
        let result: Result<Tag, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());
    }
}
