//! Rm command handler.

use anyhow::Result;
use std::path::Path;
use tracing::warn;

use super::{Session, parse_note_id};
use crate::cli::NoteArgs;
use crate::cli::output::format_deleted;
use crate::domain::NoteId;
use crate::infra::StoreError;

/// Deletes a note's file and record, returning its title.
///
/// A recorded note whose file is already gone still loses its record. A
/// note that is neither recorded nor on disk is `NotFound`.
pub(crate) fn remove_note(session: &mut Session, id: &NoteId) -> Result<String> {
    let recorded = session.database.get(id).map(|r| r.title().to_string());
    let title = match recorded {
        Some(title) => title,
        None => session.store.load(id)?.title().to_string(),
    };

    match session.store.delete(id) {
        Ok(()) => {}
        Err(StoreError::NotFound { .. }) => warn!(%id, "note file already missing"),
        Err(e) => return Err(e.into()),
    }

    if session.database.contains(id) {
        session.database.remove(id)?;
    }

    Ok(title)
}

pub fn handle_rm(args: &NoteArgs, root: &Path) -> Result<()> {
    let mut session = Session::open(root)?;
    let id = parse_note_id(&args.id)?;
    let title = remove_note(&mut session, &id)?;
    println!("{}", format_deleted(&id, &title));
    Ok(())
}
