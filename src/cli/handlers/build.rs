//! Build command handler.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::Session;
use crate::cli::output::message;
use crate::export::{SiteConfig, Templates, generate_site};
use crate::infra::SITE_DIR;

pub fn handle_build(root: &Path) -> Result<()> {
    let session = Session::open(root)?;
    let config = session.config()?;
    let templates = Templates::load(&session.project.templates_dir())?;
    let indexes = session.database.build_indexes();

    let site_config = SiteConfig {
        site_name: &config.name,
        ..SiteConfig::default()
    };
    let result = generate_site(
        &indexes,
        &session.store,
        &templates,
        &session.project.site_dir(),
        &site_config,
    )?;

    for id in &result.missing {
        eprintln!("  skipped: {id} (file missing, run `quill reindex`)");
    }

    println!(
        "{}",
        message(format!(
            "Notebook built. See {} directory.",
            format!("\"{SITE_DIR}\"").green()
        ))
    );
    Ok(())
}
