//! Builder for creating and configuring PlanEditor instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::PlanEditor;
use crate::{
    db::Database,
    error::{MasonError, Result},
    store::DEFAULT_CONTEXT,
};

/// Builder for creating and configuring PlanEditor instances.
#[derive(Debug, Clone)]
pub struct PlanEditorBuilder {
    database_path: Option<PathBuf>,
    context: String,
}

impl PlanEditorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            context: DEFAULT_CONTEXT.to_string(),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/mason/mason.db` or `~/.local/share/mason/mason.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the managed context (one plan per context).
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Builds the configured editor, creating the database if needed.
    ///
    /// # Errors
    ///
    /// Returns `MasonError::InvalidInput` if the context is empty
    /// Returns `MasonError::FileSystem` if the database path is invalid
    /// Returns `MasonError::Database` if database initialization fails
    pub async fn build(self) -> Result<PlanEditor> {
        let context = self.context.trim().to_string();
        if context.is_empty() {
            return Err(MasonError::invalid_input("context").with_reason("must not be empty"));
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| MasonError::file_system(parent, e))?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), MasonError>(())
        })
        .await
        .map_err(MasonError::join)??;

        Ok(PlanEditor::new(db_path, context))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("mason")
            .place_data_file("mason.db")
            .map_err(|e| MasonError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlanEditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
