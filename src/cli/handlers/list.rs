//! List command handler.

use anyhow::Result;
use std::path::Path;

use super::Session;
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, OutputFormat, format_list, to_json};
use crate::index::NoteRecord;

pub fn handle_list(args: &ListArgs, root: &Path) -> Result<()> {
    let session = Session::open(root)?;
    let indexes = session.database.build_indexes();
    let notes: Vec<&NoteRecord> = indexes.notes().iter().collect();

    match args.format {
        OutputFormat::Human => print!("{}", format_list(&notes)),
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(|r| NoteListing::from(*r)).collect();
            println!("{}", to_json(listings)?);
        }
    }

    Ok(())
}
