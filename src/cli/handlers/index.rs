//! Reindex command handler.

use anyhow::Result;
use std::path::Path;

use super::Session;
use crate::cli::output::message;

pub fn handle_reindex(root: &Path, verbose: bool) -> Result<()> {
    let mut session = Session::open(root)?;
    let result = session.database.rebuild(&session.store)?;

    for error in &result.errors {
        eprintln!("  error: {error}");
    }

    if verbose {
        for record in session.database.build_indexes().notes() {
            println!("  indexed: {}", session.store.path(record.id()).display());
        }
    }

    if result.errors.is_empty() {
        println!("{}", message(format!("Indexed {} notes.", result.indexed)));
    } else {
        println!(
            "{}",
            message(format!(
                "Indexed {} notes with {} errors.",
                result.indexed,
                result.errors.len()
            ))
        );
    }
    Ok(())
}
