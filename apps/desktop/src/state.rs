//! Application state.

use crate::config::Config;
use crate::db::{DbError, SqliteRepository};
use std::fs;

/// State shared by every command: the store and the configuration it was opened with.
pub struct AppState {
    pub repository: SqliteRepository,
    pub config: Config,
}

impl AppState {
    pub fn new(repository: SqliteRepository, config: Config) -> Self {
        Self { repository, config }
    }

    /// Open (or create) the database named by `config`.
    pub fn open(config: Config) -> Result<Self, DbError> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    DbError::InvalidData(format!("cannot create {}: {e}", parent.display()))
                })?;
            }
        }

        tracing::info!(path = %config.db_path.display(), "opening database");
        let repository = SqliteRepository::open(&config.db_path)?;
        Ok(Self::new(repository, config))
    }

    /// In-memory state, for tests.
    pub fn in_memory() -> Result<Self, DbError> {
        Ok(Self::new(SqliteRepository::open_in_memory()?, Config::default()))
    }
}
