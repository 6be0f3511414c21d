//! Find command handler.

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use super::Session;
use crate::cli::FindArgs;
use crate::cli::output::{NoteListing, OutputFormat, format_find, to_json};
use crate::index::parse_criteria;

pub fn handle_find(args: &FindArgs, root: &Path) -> Result<()> {
    let session = Session::open(root)?;
    let indexes = session.database.build_indexes();

    let criteria = parse_criteria(&args.criteria);
    let found = indexes.find(&criteria);
    let criteria_text = args.criteria.join(" ");
    debug!(criteria = %criteria_text, matches = found.len(), "filtered notes");

    match args.format {
        OutputFormat::Human => println!("{}", format_find(&found, &criteria_text)),
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = found.iter().map(|r| NoteListing::from(*r)).collect();
            println!("{}", to_json(listings)?);
        }
    }

    Ok(())
}
