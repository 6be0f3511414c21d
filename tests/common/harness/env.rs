//! Isolated test environment with temp directory.

use super::{QuillCommand, TestNote};
use quill::cli::config::Config;
use quill::domain::NoteId;
use quill::index::Database;
use quill::infra::{NoteStore, Project};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary project directory.
///
/// Creates a temp directory that is automatically cleaned up on drop. The
/// user config directory is redirected inside it so the real user config
/// never leaks into a test.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the project root
    root: PathBuf,
    /// Stand-in for the user config directory
    config_home: PathBuf,
}

impl TestEnv {
    /// Creates a new, uninitialized environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("notebook");
        let config_home = temp_dir.path().join("config");
        std::fs::create_dir_all(&root).expect("Failed to create project dir");
        std::fs::create_dir_all(&config_home).expect("Failed to create config dir");
        Self {
            _temp_dir: temp_dir,
            root,
            config_home,
        }
    }

    /// Creates an environment with an initialized project whose editor is
    /// `true`, so editing commands return immediately.
    pub fn initialized() -> Self {
        let env = Self::new();
        env.cmd().init().assert().success();
        env.set_editor("true");
        env
    }

    /// Returns the path to the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project(&self) -> Project {
        Project::at(&self.root)
    }

    pub fn store(&self) -> NoteStore {
        NoteStore::new(self.project().notes_dir())
    }

    /// Loads the database as currently persisted.
    pub fn database(&self) -> Database {
        Database::load(self.project().database_path()).expect("Failed to load database")
    }

    pub fn config(&self) -> Config {
        Config::load(&self.project().config_path()).expect("Failed to load config")
    }

    /// Sets the project editor command.
    pub fn set_editor(&self, editor: &str) {
        let mut config = self.config();
        config.editor = Some(editor.to_string());
        config
            .save(&self.project().config_path())
            .expect("Failed to save config");
    }

    /// Installs an editor that replaces the edited file with `text`.
    #[cfg(unix)]
    pub fn set_editor_writing(&self, text: &str) {
        use std::os::unix::fs::PermissionsExt;

        let script = self._temp_dir.path().join("editor.sh");
        let escaped = text.replace('\'', r"'\''");
        std::fs::write(
            &script,
            format!("#!/bin/sh\nprintf '%s' '{escaped}' > \"$1\"\n"),
        )
        .expect("Failed to write editor script");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make editor script executable");
        self.set_editor(&script.to_string_lossy());
    }

    /// Adds a note file and records it in the database.
    pub fn add_note(&self, test_note: &TestNote) -> NoteId {
        let id = self.write_note_file(test_note);
        let mut database = self.database();
        database
            .record_note(&id, &test_note.to_raw())
            .expect("Failed to record test note");
        id
    }

    /// Writes a note file without touching the database.
    pub fn write_note_file(&self, test_note: &TestNote) -> NoteId {
        let id = test_note.get_id().clone();
        self.store()
            .put(&id, &test_note.to_raw())
            .expect("Failed to write test note");
        id
    }

    /// Creates a QuillCommand configured for this test environment.
    pub fn cmd(&self) -> QuillCommand {
        QuillCommand::new()
            .dir(&self.root)
            .env("XDG_CONFIG_HOME", self.config_home.to_string_lossy())
    }

    /// Writes a file relative to the project root and returns its path.
    ///
    /// Useful for creating custom templates, CSS files, etc.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Reads a file relative to the project root.
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.root.join(name))
            .unwrap_or_else(|e| panic!("Failed to read {name}: {e}"))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.root().is_dir());
        assert!(!env.project().is_initialized());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_initialized_uses_noop_editor() {
        let env = TestEnv::initialized();
        assert!(env.project().is_initialized());
        assert_eq!(env.config().editor.as_deref(), Some("true"));
    }

    #[test]
    fn test_env_add_note_records_it() {
        let env = TestEnv::initialized();
        let note = TestNote::new("Recorded").tag("x");
        let id = env.add_note(&note);

        assert!(env.store().exists(&id));
        assert_eq!(env.database().get(&id).unwrap().title(), "Recorded");
    }

    #[test]
    fn test_env_write_note_file_skips_database() {
        let env = TestEnv::initialized();
        let id = env.write_note_file(&TestNote::new("Unrecorded"));
        assert!(env.store().exists(&id));
        assert!(!env.database().contains(&id));
    }
}
