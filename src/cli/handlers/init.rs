//! Init command handler.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::cli::config::Config;
use crate::cli::output::message;
use crate::index::Database;
use crate::infra::Project;

pub fn handle_init(root: &Path) -> Result<()> {
    let project = Project::at(root);
    if project.is_initialized() {
        println!("{}", message("Project already exists."));
        return Ok(());
    }

    project.create_layout()?;

    let config = Config::new(project.default_name());
    config.save(&project.config_path())?;

    Database::empty(project.database_path())
        .persist()
        .context("failed to write empty database")?;

    println!("{}", message(format!("Project \"{}\" initialized.", config.name)));
    println!(
        "{}",
        message(format!("Use \"{}\" to create your first note.", "quill new".green()))
    );
    Ok(())
}
