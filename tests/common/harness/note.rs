//! Builder for test notes with sensible defaults.

use chrono::{Duration, TimeZone, Utc};
use quill::domain::{Note, NoteId, Tag};
use quill::infra::serialize;
use std::sync::atomic::{AtomicI64, Ordering};

static NEXT_SECOND: AtomicI64 = AtomicI64::new(0);

/// Builder for creating test notes with sensible defaults.
///
/// Every note gets a distinct id unless one is set explicitly. Notes carry a
/// metadata header unless built with [`TestNote::plain`].
#[derive(Debug)]
pub struct TestNote {
    id: NoteId,
    title: String,
    tags: Vec<Tag>,
    body: String,
    has_metadata: bool,
}

impl TestNote {
    /// Creates a new test note with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        let offset = NEXT_SECOND.fetch_add(1, Ordering::Relaxed);
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Self {
            id: NoteId::from_datetime(base + Duration::seconds(offset)),
            title: title.into(),
            tags: Vec::new(),
            body: String::new(),
            has_metadata: true,
        }
    }

    /// Creates a note without a metadata header; the body is the whole text.
    pub fn plain(body: impl Into<String>) -> Self {
        let mut note = Self::new("");
        note.body = body.into();
        note.has_metadata = false;
        note
    }

    /// Sets an explicit ID for the note.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into().parse().expect("Invalid NoteId");
        self
    }

    /// Adds a tag to the note.
    pub fn tag(mut self, tag: impl AsRef<str>) -> Self {
        self.tags.push(Tag::new(tag.as_ref()).expect("Invalid tag"));
        self
    }

    /// Sets the body content (builder method).
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn get_id(&self) -> &NoteId {
        &self.id
    }

    pub fn id_str(&self) -> String {
        self.id.to_string()
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    /// Raw file text for this note.
    pub fn to_raw(&self) -> String {
        if !self.has_metadata {
            return self.body.clone();
        }
        let note = Note::builder(self.title.clone(), self.body.clone())
            .has_metadata(true)
            .tags(self.tags.iter().cloned())
            .build();
        serialize(&note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_ids_are_distinct() {
        let a = TestNote::new("A");
        let b = TestNote::new("B");
        assert_ne!(a.get_id(), b.get_id());
    }

    #[test]
    fn test_note_raw_has_header() {
        let note = TestNote::new("Hello").tag("b").tag("a").body("World");
        assert_eq!(note.to_raw(), "Title: Hello\nTags: a b\n------\n\nWorld");
    }

    #[test]
    fn test_note_plain_is_body_only() {
        assert_eq!(TestNote::plain("just text").to_raw(), "just text");
    }
}
