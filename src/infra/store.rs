//! Note file storage keyed by note id, with atomic writes.

use crate::domain::{Note, NoteId};
use crate::infra::codec::{parse, serialize};
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// File extension of note files.
pub const NOTE_EXTENSION: &str = "md";

/// Errors during file system operations on notes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("note not found: {id}")]
    NotFound { id: NoteId },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid encoding in {path}: {reason}")]
    InvalidEncoding { path: PathBuf, reason: String },
}

impl StoreError {
    fn from_io(id: &NoteId, path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound { id: id.clone() },
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied { path: path.into() },
            _ => StoreError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A flat directory of note files named `<id>.md`.
#[derive(Debug, Clone)]
pub struct NoteStore {
    dir: PathBuf,
}

impl NoteStore {
    /// Creates a store over the given directory. The directory is not touched.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the notes directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path for a note id.
    pub fn path(&self, id: &NoteId) -> PathBuf {
        self.dir.join(format!("{}.{}", id, NOTE_EXTENSION))
    }

    /// Returns true if a file exists for the id.
    pub fn exists(&self, id: &NoteId) -> bool {
        self.path(id).is_file()
    }

    /// Reads the raw text of a note.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no file exists for the id.
    /// Returns `StoreError::InvalidEncoding` if the file is not UTF-8.
    pub fn get(&self, id: &NoteId) -> StoreResult<String> {
        let path = self.path(id);
        let bytes = std::fs::read(&path).map_err(|e| StoreError::from_io(id, &path, e))?;

        let text = String::from_utf8(bytes).map_err(|e| StoreError::InvalidEncoding {
            path: path.clone(),
            reason: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        })?;

        // Strip UTF-8 BOM if present
        Ok(match text.strip_prefix('\u{FEFF}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }

    /// Writes the raw text of a note, creating or replacing its file.
    ///
    /// Uses a temporary file in the notes directory and an atomic rename so a
    /// crash never leaves a half-written note behind.
    pub fn put(&self, id: &NoteId, text: &str) -> StoreResult<()> {
        let path = self.path(id);
        write_atomic(&self.dir, &path, text)?;
        debug!(%id, path = %path.display(), "wrote note");
        Ok(())
    }

    /// Deletes a note file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no file exists for the id.
    pub fn delete(&self, id: &NoteId) -> StoreResult<()> {
        let path = self.path(id);
        std::fs::remove_file(&path).map_err(|e| StoreError::from_io(id, &path, e))?;
        debug!(%id, "deleted note");
        Ok(())
    }

    /// Reads and parses a note.
    pub fn load(&self, id: &NoteId) -> StoreResult<Note> {
        Ok(parse(&self.get(id)?))
    }

    /// Rewrites a note file in canonical form (sorted, lowercased tags and an
    /// explicit title line) and returns the parsed note.
    pub fn sanitize(&self, id: &NoteId) -> StoreResult<Note> {
        let note = self.load(id)?;
        self.put(id, &serialize(&note))?;
        Ok(note)
    }

    /// Lists the ids of all note files, in ascending order.
    ///
    /// Only files directly inside the notes directory whose stem is a valid
    /// note id are considered. Hidden files and anything else are skipped.
    pub fn list_ids(&self) -> StoreResult<Vec<NoteId>> {
        if !self.dir.is_dir() {
            return Err(StoreError::Io {
                path: self.dir.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "notes directory is missing"),
            });
        }

        let mut ids: Vec<NoteId> = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == NOTE_EXTENSION))
            .filter_map(|e| {
                let stem = e.path().file_stem()?.to_str()?.to_string();
                stem.parse::<NoteId>().ok()
            })
            .collect();

        ids.sort();
        Ok(ids)
    }
}

/// Writes `contents` to `path` atomically via a temporary file in `dir`.
pub(crate) fn write_atomic(dir: &Path, path: &Path, contents: &str) -> StoreResult<()> {
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| StoreError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.write_all(contents.as_bytes())
        .map_err(|e| StoreError::Io {
            path: path.into(),
            source: e,
        })?;

    temp.persist(path).map_err(|e| StoreError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}
