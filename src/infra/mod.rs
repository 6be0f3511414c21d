//! File I/O, note codec, project layout

pub mod codec;
mod project;
mod store;

pub use codec::{METADATA_DELIMITER, parse, serialize};
pub use project::{
    CONFIG_FILE, DATABASE_FILE, MARKER_FILE, NOTES_DIR, Project, ProjectError, SITE_DIR,
    TEMPLATES_DIR, marker_stamp,
};
pub use store::{NOTE_EXTENSION, NoteStore, StoreError, StoreResult};
pub(crate) use store::write_atomic;
