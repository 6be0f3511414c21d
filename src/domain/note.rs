//! Parsed note: title, tags, and body, with an optional metadata header.

use crate::domain::Tag;
use std::collections::BTreeSet;

/// A note parsed from its raw text.
///
/// Notes are plain-text files. A note may start with a metadata header
/// (`Title:` and `Tags:` lines) separated from the body by a line of six
/// hyphens followed by a blank line. Notes without a header still get a title,
/// taken from the first line of their content.
///
/// # Examples
///
/// ```
/// use quill::domain::{Note, Tag};
///
/// let note = Note::builder("Groceries", "- milk\n- eggs")
///     .has_metadata(true)
///     .tag(Tag::new("home").unwrap())
///     .build();
/// assert_eq!(note.title(), "Groceries");
/// assert!(note.has_tag("home"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    has_metadata: bool,
    title: String,
    tags: BTreeSet<Tag>,
    content: String,
    raw: String,
}

impl Note {
    /// Creates a builder for a note with the given title and content.
    pub fn builder(title: impl Into<String>, content: impl Into<String>) -> NoteBuilder {
        NoteBuilder {
            has_metadata: false,
            title: title.into(),
            tags: BTreeSet::new(),
            content: content.into(),
            raw: None,
        }
    }

    /// Returns true if the note carries a metadata header.
    pub fn has_metadata(&self) -> bool {
        self.has_metadata
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's tags in lexicographic order.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Returns the body of the note (everything after the header).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the text the note was parsed from, trimmed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns true if the note carries the given (lowercase) tag.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == name)
    }
}

/// Builder for constructing a [`Note`].
#[derive(Debug)]
pub struct NoteBuilder {
    has_metadata: bool,
    title: String,
    tags: BTreeSet<Tag>,
    content: String,
    raw: Option<String>,
}

impl NoteBuilder {
    /// Marks whether the note has a metadata header.
    pub fn has_metadata(mut self, has_metadata: bool) -> Self {
        self.has_metadata = has_metadata;
        self
    }

    /// Adds a tag.
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Replaces the tag set.
    pub fn tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the raw text the note was parsed from.
    pub fn raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    /// Builds the note. Without an explicit raw text, the content stands in.
    pub fn build(self) -> Note {
        let raw = self.raw.unwrap_or_else(|| self.content.trim().to_string());
        Note {
            has_metadata: self.has_metadata,
            title: self.title,
            tags: self.tags,
            content: self.content,
            raw,
        }
    }
}
