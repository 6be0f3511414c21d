//! Edit, last and print command handlers.

use anyhow::{Context, Result, anyhow};
use std::path::Path;

use super::{CommandEditor, EditorLauncher, Session, parse_note_id};
use crate::cli::NoteArgs;
use crate::cli::output::{SEPARATOR, format_note_written};
use crate::domain::NoteId;
use crate::index::{IndexError, NoteRecord};

/// Opens an existing note in the editor, rewrites it in canonical form and
/// records it.
pub(crate) fn edit_note(
    session: &mut Session,
    id: &NoteId,
    editor: &dyn EditorLauncher,
) -> Result<NoteRecord> {
    if !session.store.exists(id) {
        return Err(IndexError::NoteNotFound { id: id.clone() }.into());
    }

    editor.open(&session.store.path(id))?;

    let note = session
        .store
        .sanitize(id)
        .with_context(|| format!("failed to save note {id}"))?;
    let record = session.database.upsert(id, &note).clone();
    session.database.persist()?;
    Ok(record)
}

/// Id of the most recently created note.
pub(crate) fn last_note_id(session: &Session) -> Result<NoteId> {
    session
        .database
        .build_indexes()
        .last()
        .map(|record| record.id().clone())
        .ok_or_else(|| anyhow!("no notes yet, create one with `quill new`"))
}

fn edit_and_report(session: &mut Session, id: &NoteId) -> Result<()> {
    let editor = CommandEditor::from_config(&session.config()?)?;
    let record = edit_note(session, id, &editor)?;
    println!(
        "\n{}\n{SEPARATOR}",
        format_note_written(record.id(), record.title(), "saved")
    );
    Ok(())
}

pub fn handle_edit(args: &NoteArgs, root: &Path) -> Result<()> {
    let mut session = Session::open(root)?;
    let id = parse_note_id(&args.id)?;
    edit_and_report(&mut session, &id)
}

pub fn handle_last(root: &Path) -> Result<()> {
    let mut session = Session::open(root)?;
    let id = last_note_id(&session)?;
    edit_and_report(&mut session, &id)
}

pub fn handle_print(args: &NoteArgs, root: &Path) -> Result<()> {
    let session = Session::open(root)?;
    let id = parse_note_id(&args.id)?;
    let raw = session.store.get(&id)?;
    println!("{raw}");
    Ok(())
}
