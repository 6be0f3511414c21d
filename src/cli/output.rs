//! Output formats and human-readable rendering for CLI commands.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::domain::NoteId;
use crate::index::{NoteRecord, TagCount};

/// Line framing note and tag listings.
pub const SEPARATOR: &str = "\n--------------------------------\n";

/// Width of the tag column in `tags` output.
const TAG_COLUMN: usize = 16;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
}

impl From<&NoteRecord> for NoteListing {
    fn from(record: &NoteRecord) -> Self {
        Self {
            id: record.id().to_string(),
            title: record.title().to_string(),
            tags: record.tags().iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// A tag with its note count.
#[derive(Debug, Serialize)]
pub struct TagListing {
    pub name: String,
    pub count: usize,
}

impl From<&TagCount> for TagListing {
    fn from(tag: &TagCount) -> Self {
        Self {
            name: tag.name().to_string(),
            count: tag.count(),
        }
    }
}

/// Serializes `data` as pretty JSON wrapped in `{"data": ...}`.
pub fn to_json<T: Serialize>(data: T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Output::new(data))
}

/// A status line, prefixed like every message the tool prints.
pub fn message(text: impl std::fmt::Display) -> String {
    format!(">\t{text}")
}

/// Two-line summary of a note: id and title, then its tags.
pub fn note_summary(record: &NoteRecord) -> String {
    let tags: Vec<String> = record
        .tags()
        .iter()
        .map(|t| t.as_str().yellow().to_string())
        .collect();
    format!(
        "[{}]  {}\nTags:    {}\n",
        record.id(),
        record.title().green(),
        tags.join("  ")
    )
}

fn summaries(records: &[&NoteRecord]) -> String {
    records
        .iter()
        .map(|r| note_summary(r))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Output of `ls`.
pub fn format_list(records: &[&NoteRecord]) -> String {
    format!(
        "{}{SEPARATOR}{}{SEPARATOR}",
        message(format!("Found {} notes as shown below.", records.len())),
        summaries(records)
    )
}

/// Output of `find`.
pub fn format_find(records: &[&NoteRecord], criteria: &str) -> String {
    format!(
        "{SEPARATOR}{}{SEPARATOR}\n{}",
        summaries(records),
        message(format!(
            "Found {} notes with criteria \"{}\" as shown above.",
            records.len().to_string().green(),
            criteria.green()
        ))
    )
}

/// Output of `tags`.
pub fn format_tags(tags: &[TagCount]) -> String {
    let rows: Vec<String> = tags
        .iter()
        .map(|t| {
            format!(
                "{:<width$}{}",
                t.name(),
                t.count().to_string().green(),
                width = TAG_COLUMN
            )
        })
        .collect();
    format!(
        "{:<width$}Count{SEPARATOR}{}{SEPARATOR}\n{}",
        "Tag",
        rows.join("\n"),
        message(format!(
            "Found {} tags as shown above.",
            tags.len().to_string().green()
        )),
        width = TAG_COLUMN
    )
}

/// Confirmation after a note was written. `verb` is "added" or "saved".
pub fn format_note_written(id: &NoteId, title: &str, verb: &str) -> String {
    format!(
        "{}\n{}",
        message(format!("Your note [{id}]")),
        message(format!("\"{}\" has been {verb}.", title.green()))
    )
}

/// Confirmation after a note was deleted.
pub fn format_deleted(id: &NoteId, title: &str) -> String {
    message(format!("Deleted [{id}] \"{}\".", title.green()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;
    use crate::index::Indexes;
    use pretty_assertions::assert_eq;

    fn plain() {
        colored::control::set_override(false);
    }

    fn record(id: &str, title: &str, tags: &[&str]) -> NoteRecord {
        NoteRecord::new(
            id.parse().unwrap(),
            title,
            tags.iter().map(|t| Tag::new(t).unwrap()),
        )
    }

    #[test]
    fn summary_lists_id_title_and_tags() {
        plain();
        let r = record("2024-01-15-103000", "Hello", &["b", "a"]);
        assert_eq!(
            note_summary(&r),
            "[2024-01-15-103000]  Hello\nTags:    a  b\n"
        );
    }

    #[test]
    fn summary_without_tags() {
        plain();
        let r = record("2024-01-15-103000", "Hello", &[]);
        assert_eq!(note_summary(&r), "[2024-01-15-103000]  Hello\nTags:    \n");
    }

    #[test]
    fn list_output_frames_summaries() {
        plain();
        let a = record("2024-01-15-103000", "A", &["x"]);
        let b = record("2024-01-16-103000", "B", &[]);
        let out = format_list(&[&a, &b]);
        assert_eq!(
            out,
            ">\tFound 2 notes as shown below.\n\
             --------------------------------\n\
             [2024-01-15-103000]  A\nTags:    x\n\n\
             [2024-01-16-103000]  B\nTags:    \n\
             \n--------------------------------\n"
        );
    }

    #[test]
    fn find_output_reports_criteria() {
        plain();
        let a = record("2024-01-15-103000", "A", &["x"]);
        let out = format_find(&[&a], ":x hello");
        assert!(out.starts_with(SEPARATOR));
        assert!(out.ends_with(">\tFound 1 notes with criteria \":x hello\" as shown above."));
    }

    #[test]
    fn tags_output_pads_names() {
        plain();
        let records = [
            record("2024-01-15-103000", "A", &["rust", "cli"]),
            record("2024-01-16-103000", "B", &["rust"]),
        ];
        let indexes = Indexes::build(&records);
        let out = format_tags(indexes.tags());
        assert!(out.starts_with("Tag             Count\n"));
        assert!(out.contains("\ncli             1\nrust            2\n"));
        assert!(out.ends_with(">\tFound 2 tags as shown above."));
    }

    #[test]
    fn written_and_deleted_messages() {
        plain();
        let id: NoteId = "2024-01-15-103000".parse().unwrap();
        assert_eq!(
            format_note_written(&id, "Hi", "added"),
            ">\tYour note [2024-01-15-103000]\n>\t\"Hi\" has been added."
        );
        assert_eq!(
            format_deleted(&id, "Hi"),
            ">\tDeleted [2024-01-15-103000] \"Hi\"."
        );
    }

    #[test]
    fn json_wraps_data() {
        let r = record("2024-01-15-103000", "Hello", &["a"]);
        let json = to_json(vec![NoteListing::from(&r)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"][0]["id"], "2024-01-15-103000");
        assert_eq!(value["data"][0]["tags"][0], "a");
    }
}
