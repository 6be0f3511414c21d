//! Command handlers for the CLI.

mod build;
mod completions;
mod index;
mod init;
mod list;
mod metadata;
mod new;
mod remove;
mod search;
mod show_edit;


use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::cli::config::{Config, UserConfig, resolve_editor};
use crate::domain::NoteId;
use crate::index::Database;
use crate::infra::{NoteStore, Project};

// Re-export public items
pub use build::handle_build;
pub use completions::handle_completions;
pub use index::handle_reindex;
pub use init::handle_init;
pub use list::handle_list;
pub use metadata::handle_tags;
pub use new::{DEFAULT_NOTE_TEXT, handle_new};
pub use remove::handle_rm;
pub use search::handle_find;
pub use show_edit::{handle_edit, handle_last, handle_print};

// Re-export for tests
#[cfg(test)]
pub(crate) use new::create_note;
#[cfg(test)]
pub(crate) use remove::remove_note;
#[cfg(test)]
pub(crate) use show_edit::{edit_note, last_note_id};

// ===========================================
// Shared Utilities
// ===========================================

/// Everything a command needs from an initialized project: its layout, the
/// note files, and the record database loaded once.
pub(crate) struct Session {
    pub(crate) project: Project,
    pub(crate) store: NoteStore,
    pub(crate) database: Database,
}

impl Session {
    /// Opens the project at `root`.
    ///
    /// Fails with `ProjectError::NotInitialized` when the marker is missing.
    pub(crate) fn open(root: &Path) -> Result<Self> {
        let project = Project::open(root)?;
        let store = NoteStore::new(project.notes_dir());
        let database = Database::load(project.database_path())
            .with_context(|| format!("failed to load database in {}", root.display()))?;
        Ok(Self {
            project,
            store,
            database,
        })
    }

    /// The project configuration, named after the directory when the file is
    /// missing.
    pub(crate) fn config(&self) -> Result<Config> {
        Ok(Config::load_or_default(
            &self.project.config_path(),
            &self.project.default_name(),
        )?)
    }
}

/// Parses a note id given on the command line.
pub(crate) fn parse_note_id(value: &str) -> Result<NoteId> {
    value
        .parse()
        .with_context(|| format!("invalid note id '{value}'"))
}

/// Trait for launching an editor (allows mocking in tests).
pub(crate) trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Runs the configured editor command on a file and waits for it to exit.
pub(crate) struct CommandEditor {
    command: String,
}

impl CommandEditor {
    pub(crate) fn from_config(config: &Config) -> Result<Self> {
        let user = UserConfig::load()?;
        Ok(Self {
            command: resolve_editor(config, &user),
        })
    }
}

impl EditorLauncher for CommandEditor {
    fn open(&self, path: &Path) -> Result<()> {
        // Editor command may include args like "code --wait"
        let mut parts = self.command.split_whitespace();
        let Some(program) = parts.next() else {
            bail!("editor command is empty");
        };

        debug!(editor = %self.command, path = %path.display(), "launching editor");
        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .with_context(|| format!("failed to launch editor '{}'", self.command))?;

        if !status.success() {
            bail!("editor '{}' exited with non-zero status", self.command);
        }

        Ok(())
    }
}
