//! Tags command handler.

use anyhow::Result;
use std::path::Path;

use super::Session;
use crate::cli::TagsArgs;
use crate::cli::output::{OutputFormat, TagListing, format_tags, to_json};

pub fn handle_tags(args: &TagsArgs, root: &Path) -> Result<()> {
    let session = Session::open(root)?;
    let indexes = session.database.build_indexes();

    match args.format {
        OutputFormat::Human => println!("{}", format_tags(indexes.tags())),
        OutputFormat::Json => {
            let listings: Vec<TagListing> = indexes.tags().iter().map(TagListing::from).collect();
            println!("{}", to_json(listings)?);
        }
    }

    Ok(())
}
