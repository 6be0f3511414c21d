//! Persisted record database and the indexes derived from it.

use crate::domain::{Note, NoteId, Tag};
use crate::index::search::{Criterion, find};
use crate::infra::{NoteStore, StoreError, parse, write_atomic};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The requested note is not recorded in the database.
    #[error("note not found: {id}")]
    NoteNotFound { id: NoteId },

    /// The database file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The database file is not a valid record document.
    #[error("malformed database {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing a file failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for database operations.
pub type IndexResult<T> = Result<T, IndexError>;

// ===========================================
// Records
// ===========================================

/// The database's projection of a note: id, title, and tags, without the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    id: NoteId,
    #[serde(default)]
    title: String,
    #[serde(alias = "md_Tags", default, deserialize_with = "lenient_tags")]
    tags: BTreeSet<Tag>,
}

impl NoteRecord {
    /// Creates a record.
    pub fn new(id: NoteId, title: impl Into<String>, tags: impl IntoIterator<Item = Tag>) -> Self {
        Self {
            id,
            title: title.into(),
            tags: tags.into_iter().collect(),
        }
    }

    /// Projects a parsed note into a record.
    pub fn from_note(id: NoteId, note: &Note) -> Self {
        Self::new(id, note.title(), note.tags().iter().cloned())
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the record's tags in lexicographic order.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Returns true if the record carries the given (lowercase) tag.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == name)
    }
}

/// Lowercases tags written by older versions and drops ones that are no
/// longer valid (such as empty strings).
fn lenient_tags<'de, D>(deserializer: D) -> Result<BTreeSet<Tag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().filter_map(|s| Tag::new(s).ok()).collect())
}

/// A tag with the number of notes carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    #[serde(rename = "name")]
    tag: Tag,
    count: usize,
}

impl TagCount {
    pub fn new(tag: Tag, count: usize) -> Self {
        Self { tag, count }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn name(&self) -> &str {
        self.tag.as_str()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

// ===========================================
// Derived indexes
// ===========================================

/// Sorted views computed from the record mapping.
#[derive(Debug, Clone, Default)]
pub struct Indexes {
    notes: Vec<NoteRecord>,
    tags: Vec<TagCount>,
}

impl Indexes {
    /// Builds both indexes from records in any order.
    pub fn build<'a>(records: impl IntoIterator<Item = &'a NoteRecord>) -> Self {
        let mut notes: Vec<NoteRecord> = records.into_iter().cloned().collect();
        notes.sort_by(|a, b| a.id.cmp(&b.id));

        let mut counts: BTreeMap<&Tag, usize> = BTreeMap::new();
        for record in &notes {
            for tag in &record.tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        let tags = counts
            .into_iter()
            .map(|(tag, count)| TagCount::new(tag.clone(), count))
            .collect();

        Self { notes, tags }
    }

    /// Records sorted by id, oldest first.
    pub fn notes(&self) -> &[NoteRecord] {
        &self.notes
    }

    /// Tags sorted by name, with their note counts.
    pub fn tags(&self) -> &[TagCount] {
        &self.tags
    }

    /// The most recently created note.
    pub fn last(&self) -> Option<&NoteRecord> {
        self.notes.last()
    }

    /// Records matching every criterion, in id order.
    pub fn find(&self, criteria: &[Criterion]) -> Vec<&NoteRecord> {
        find(&self.notes, criteria)
    }

    /// Records carrying the tag, newest first.
    pub fn newest_with_tag(&self, name: &str) -> Vec<&NoteRecord> {
        self.notes.iter().rev().filter(|r| r.has_tag(name)).collect()
    }
}

// ===========================================
// Database
// ===========================================

#[derive(Deserialize)]
struct DatabaseFile {
    #[serde(default)]
    notes: BTreeMap<NoteId, NoteRecord>,
}

#[derive(Serialize)]
struct DatabaseFileRef<'a> {
    notes: &'a BTreeMap<NoteId, NoteRecord>,
}

/// Outcome of rebuilding the database from note files.
#[derive(Debug, Default)]
pub struct RebuildResult {
    pub indexed: usize,
    pub errors: Vec<StoreError>,
}

/// The record mapping, loaded once per command and written back in full on
/// every mutation.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    records: BTreeMap<NoteId, NoteRecord>,
}

impl Database {
    /// Creates an empty database that will persist to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: BTreeMap::new(),
        }
    }

    /// Loads the database from `path`.
    ///
    /// A missing file loads as an empty database. Tags are lowercased on the
    /// way in.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Malformed` if the file is not a record document.
    pub fn load(path: impl Into<PathBuf>) -> IndexResult<Self> {
        let path = path.into();

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "database file missing, starting empty");
                return Ok(Self::empty(path));
            }
            Err(source) => return Err(IndexError::Io { path, source }),
        };

        // Older versions created the file empty before writing it
        let file: DatabaseFile = if text.trim().is_empty() {
            DatabaseFile {
                notes: BTreeMap::new(),
            }
        } else {
            serde_json::from_str(&text).map_err(|source| IndexError::Malformed {
                path: path.clone(),
                source,
            })?
        };

        // The mapping key is authoritative for the id
        let records: BTreeMap<NoteId, NoteRecord> = file
            .notes
            .into_iter()
            .map(|(id, mut record)| {
                record.id = id.clone();
                (id, record)
            })
            .collect();

        debug!(path = %path.display(), records = records.len(), "loaded database");
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &NoteId) -> Option<&NoteRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.records.contains_key(id)
    }

    /// Inserts or replaces the record for a parsed note, in memory only.
    pub fn upsert(&mut self, id: &NoteId, note: &Note) -> &NoteRecord {
        let record = NoteRecord::from_note(id.clone(), note);
        self.records.insert(id.clone(), record);
        &self.records[id]
    }

    /// Parses raw note text, records it, and persists the database.
    pub fn record_note(&mut self, id: &NoteId, raw: &str) -> IndexResult<NoteRecord> {
        let note = parse(raw);
        let record = self.upsert(id, &note).clone();
        self.persist()?;
        debug!(%id, title = record.title(), "recorded note");
        Ok(record)
    }

    /// Removes a record and persists the database.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::NoteNotFound` if the id is not recorded.
    pub fn remove(&mut self, id: &NoteId) -> IndexResult<NoteRecord> {
        let record = self
            .records
            .remove(id)
            .ok_or_else(|| IndexError::NoteNotFound { id: id.clone() })?;
        self.persist()?;
        debug!(%id, "removed record");
        Ok(record)
    }

    /// Writes the full mapping as a tab-indented JSON document, atomically.
    pub fn persist(&self) -> IndexResult<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        DatabaseFileRef {
            notes: &self.records,
        }
        .serialize(&mut serializer)
        .map_err(|source| IndexError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        // serde_json only ever emits UTF-8
        let text = String::from_utf8_lossy(&buf);

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        write_atomic(dir, &self.path, &text)?;
        Ok(())
    }

    /// Derives the sorted note and tag indexes.
    pub fn build_indexes(&self) -> Indexes {
        Indexes::build(self.records.values())
    }

    /// Replaces every record with one parsed from the note files in `store`,
    /// then persists.
    ///
    /// Files that cannot be read are reported in the result and left out.
    pub fn rebuild(&mut self, store: &NoteStore) -> IndexResult<RebuildResult> {
        let mut result = RebuildResult::default();
        let mut records = BTreeMap::new();

        for id in store.list_ids()? {
            match store.load(&id) {
                Ok(note) => {
                    records.insert(id.clone(), NoteRecord::from_note(id, &note));
                    result.indexed += 1;
                }
                Err(e) => result.errors.push(e),
            }
        }

        self.records = records;
        self.persist()?;
        info!(
            indexed = result.indexed,
            errors = result.errors.len(),
            "rebuilt database"
        );
        Ok(result)
    }
}
