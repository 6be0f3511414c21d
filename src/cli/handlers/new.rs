//! New command handler.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::{CommandEditor, EditorLauncher, Session};
use crate::cli::NewArgs;
use crate::cli::output::format_note_written;
use crate::domain::NoteId;
use crate::index::NoteRecord;

/// Text of a freshly created note.
pub const DEFAULT_NOTE_TEXT: &str = "Title: Untitled\nTags: tag1 tag2\n------\n\nUse 6 hyphens to declare metadata area. Omitting metadata is ok.";

/// Creates a note with the default text, records it, optionally opens it in
/// an editor, and records it again with whatever the editor left behind.
pub(crate) fn create_note(
    session: &mut Session,
    editor: Option<&dyn EditorLauncher>,
) -> Result<NoteRecord> {
    let id = NoteId::now().next_free(|id| session.store.exists(id) || session.database.contains(id));

    session
        .store
        .put(&id, DEFAULT_NOTE_TEXT)
        .with_context(|| format!("failed to write note {id}"))?;
    session.database.record_note(&id, DEFAULT_NOTE_TEXT)?;
    info!(%id, "created note");

    if let Some(editor) = editor {
        editor.open(&session.store.path(&id))?;
    }

    let raw = session.store.get(&id)?;
    Ok(session.database.record_note(&id, &raw)?)
}

pub fn handle_new(args: &NewArgs, root: &Path) -> Result<()> {
    let mut session = Session::open(root)?;

    let record = if args.no_edit {
        create_note(&mut session, None)?
    } else {
        let editor = CommandEditor::from_config(&session.config()?)?;
        create_note(&mut session, Some(&editor))?
    };

    println!("{}", format_note_written(record.id(), record.title(), "added"));
    Ok(())
}
