//! Database and index path utilities

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::db::Database;

const DB_DIR: &str = ".scipdex";
const DB_FILE: &str = "index.db";
const INDEX_FILE: &str = "index.scip";

/// Get the database path for a project root
pub fn database_path(project_root: &str) -> PathBuf {
    PathBuf::from(project_root).join(DB_DIR).join(DB_FILE)
}

/// Get the expected SCIP index file path for a project root
pub fn index_path(project_root: &str) -> PathBuf {
    PathBuf::from(project_root).join(INDEX_FILE)
}

/// Ensure the database directory exists
pub fn ensure_database_directory(project_root: &str) -> Result<()> {
    let dir = PathBuf::from(project_root).join(DB_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(())
}

/// Open or initialize database for a project
pub fn open_project_database(project_root: &str) -> Result<Database> {
    ensure_database_directory(project_root)?;
    let db_path = database_path(project_root);
    Database::open(&db_path)
}

/// Canonicalize and validate a path
pub fn canonicalize_path(path: &str) -> Result<String> {
    std::path::Path::new(path)
        .canonicalize()
        .context("Invalid path")?
        .display()
        .to_string()
        .pipe(Ok)
}

// Helper trait for pipe operation
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}
