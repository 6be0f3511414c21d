//! Core types: Note, Tag, NoteId (timestamp)

mod note;
mod note_id;
mod tag;

pub use note::{Note, NoteBuilder};
pub use note_id::{NoteId, ParseNoteIdError, ID_LEN};
pub use tag::{ParseTagError, Tag};
