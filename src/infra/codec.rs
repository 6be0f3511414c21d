//! Codec for the plain-text note format with an optional metadata header.

use crate::domain::{Note, Tag};
use std::collections::BTreeSet;

/// Separates the metadata header from the note body.
pub const METADATA_DELIMITER: &str = "\n------\n\n";

/// Longest title derived from note content, in characters.
const TITLE_MAX_CHARS: usize = 50;

const TITLE_PREFIX: &str = "Title: ";
const TAGS_PREFIX: &str = "Tags: ";

/// Parses raw note text.
///
/// # Format
/// ```text
/// Title: Note Title
/// Tags: tag1 tag2
/// ------
///
/// Body content here...
/// ```
///
/// The header is optional. Without it, the trimmed text is the content and the
/// title is the first 50 characters of its first line.
///
/// With a header, the text is split at the first delimiter. The title defaults
/// to the first line of the content (with `...` appended when that line is
/// longer than 49 characters) and is replaced by a `Title: ` line if present.
/// A `Tags: ` line sets the space-separated, lowercased tags. When a line is
/// repeated, the last one wins.
///
/// Parsing never fails: malformed metadata leaves the defaults in place. Tags
/// are kept as written apart from case; only the empty tokens left by
/// repeated spaces are dropped.
pub fn parse(raw: &str) -> Note {
    let trimmed = raw.trim();

    let Some((header, content)) = raw.split_once(METADATA_DELIMITER) else {
        let title = truncate_chars(first_line(trimmed), TITLE_MAX_CHARS);
        return Note::builder(title, trimmed).raw(trimmed).build();
    };

    let mut title = default_title(content);
    let mut tags = BTreeSet::new();

    for line in header.split('\n') {
        if let Some(rest) = line.strip_prefix(TAGS_PREFIX) {
            tags = rest
                .split(' ')
                .filter_map(|token| Tag::new(token).ok())
                .collect();
        }
        if let Some(rest) = line.strip_prefix(TITLE_PREFIX) {
            title = rest.to_string();
        }
    }

    Note::builder(title, content)
        .has_metadata(true)
        .tags(tags)
        .raw(trimmed)
        .build()
}

/// Serializes a note back to its canonical text form.
///
/// Notes with a header are written as `Title:` and `Tags:` lines (tags sorted
/// and space-joined), the delimiter, then the content. Notes without a header
/// are written as their content alone.
pub fn serialize(note: &Note) -> String {
    if !note.has_metadata() {
        return note.content().to_string();
    }

    let tags: Vec<&str> = note.tags().iter().map(Tag::as_str).collect();
    format!(
        "{}{}\n{}{}{}{}",
        TITLE_PREFIX,
        note.title(),
        TAGS_PREFIX,
        tags.join(" "),
        METADATA_DELIMITER,
        note.content()
    )
}

fn default_title(content: &str) -> String {
    let line = first_line(content.trim());
    let mut title = truncate_chars(line, TITLE_MAX_CHARS);
    if line.chars().count() > TITLE_MAX_CHARS - 1 {
        title.push_str("...");
    }
    title
}

fn first_line(s: &str) -> &str {
    s.split('\n').next().unwrap_or_default()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
