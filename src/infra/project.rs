//! On-disk project layout and the initialization guard.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Marker file whose presence makes a directory a project.
pub const MARKER_FILE: &str = ".quill-home";
/// Project configuration file.
pub const CONFIG_FILE: &str = "quill.toml";
/// Persisted record database.
pub const DATABASE_FILE: &str = "quill-database.json";
/// Directory holding the note files.
pub const NOTES_DIR: &str = "notes";
/// Directory the static site is built into.
pub const SITE_DIR: &str = "www";
/// Optional directory of template overrides.
pub const TEMPLATES_DIR: &str = "templates";

/// Errors raised while locating or bootstrapping a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project does not exist in {root}")]
    NotInitialized { root: PathBuf },

    #[error("project already exists in {root}")]
    AlreadyInitialized { root: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProjectError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Text written to the marker file, identifying the tool version.
pub fn marker_stamp() -> String {
    format!("quill--{}", env!("CARGO_PKG_VERSION"))
}

/// A project directory and the paths of everything inside it.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Describes a project rooted at `root` without checking that it exists.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens an initialized project and restamps its marker with the running
    /// version.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotInitialized` if the marker file is missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ProjectError> {
        let project = Self::at(root);
        if !project.is_initialized() {
            return Err(ProjectError::NotInitialized {
                root: project.root.clone(),
            });
        }
        project.stamp_version()?;
        Ok(project)
    }

    /// Returns true if the marker file exists.
    pub fn is_initialized(&self) -> bool {
        self.marker_path().is_file()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn marker_path(&self) -> PathBuf {
        self.root.join(MARKER_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn database_path(&self) -> PathBuf {
        self.root.join(DATABASE_FILE)
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join(NOTES_DIR)
    }

    pub fn site_dir(&self) -> PathBuf {
        self.root.join(SITE_DIR)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }

    /// Project name derived from the root directory's name.
    pub fn default_name(&self) -> String {
        let resolved = self
            .root
            .canonicalize()
            .unwrap_or_else(|_| self.root.clone());
        resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "notes".to_string())
    }

    /// Rewrites the marker when it was written by another version.
    pub fn stamp_version(&self) -> Result<(), ProjectError> {
        let path = self.marker_path();
        let stamp = marker_stamp();
        let current = std::fs::read_to_string(&path).unwrap_or_default();
        if current.trim() != stamp {
            debug!(from = current.trim(), to = %stamp, "restamping project marker");
            std::fs::write(&path, format!("{}\n", stamp)).map_err(ProjectError::io(&path))?;
        }
        Ok(())
    }

    /// Creates the directory layout of a new project: the marker, the notes
    /// and site directories, and a `.gitignore` excluding the built site.
    ///
    /// Configuration and database files are written by their owners.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::AlreadyInitialized` if the marker exists.
    pub fn create_layout(&self) -> Result<(), ProjectError> {
        if self.is_initialized() {
            return Err(ProjectError::AlreadyInitialized {
                root: self.root.clone(),
            });
        }

        for dir in [self.root.clone(), self.notes_dir(), self.site_dir()] {
            std::fs::create_dir_all(&dir).map_err(ProjectError::io(&dir))?;
        }

        for keep in [self.notes_dir().join(".gitkeep"), self.site_dir().join(".gitkeep")] {
            std::fs::write(&keep, "").map_err(ProjectError::io(&keep))?;
        }

        let gitignore = self.root.join(".gitignore");
        std::fs::write(&gitignore, format!("{}\n", SITE_DIR))
            .map_err(ProjectError::io(&gitignore))?;

        let marker = self.marker_path();
        std::fs::write(&marker, format!("{}\n", marker_stamp()))
            .map_err(ProjectError::io(&marker))?;

        info!(root = %self.root.display(), "created project layout");
        Ok(())
    }
}
