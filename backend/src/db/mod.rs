pub mod verses;
pub mod verses_models;
pub mod verses_schema;

use std::fs;
use std::path::Path;

use diesel::prelude::*;
use diesel::r2d2::{Pool, ConnectionManager};
use anyhow::{Context, Result, Error as AnyhowError};

pub use crate::db::verses::VersesDbHandle;

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug)]
pub struct DatabaseHandle {
    pool: SqlitePool,
}

impl DatabaseHandle {
    pub fn new(database_url: &str) -> Result<Self> {
        let manager = ConnectionManager::new(database_url);
        let pool = Pool::builder()
            .max_size(2)
            .build(manager)
            .with_context(|| format!("Failed to create pool for: {}", database_url))?;

        Ok(Self { pool })
    }

    /// Opens an existing database file. Does not create one, the database is
    /// only ever produced by the bootstrap.
    pub fn open(db_path: &Path) -> Result<Self> {
        if !db_path.exists() {
            anyhow::bail!("Database file not found at expected location: {:?}", db_path);
        }

        let abs_path = fs::canonicalize(db_path).unwrap_or(db_path.to_path_buf());
        let database_url = abs_path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid database path: {:?}", abs_path))?;

        Self::new(database_url)
    }

    /// Performs a read operation on the database.
    pub fn do_read<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error>,
    {
        let mut db_conn = self.pool.get()
            .context("Failed to get connection from pool for read")?;
        operation(&mut db_conn).map_err(AnyhowError::from)
    }
}

pub fn establish_connection(db_path: &Path) -> Result<SqliteConnection> {
    let db_url = db_path.to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid database path"))?;

    SqliteConnection::establish(db_url)
        .with_context(|| format!("Failed to connect to database: {}", db_url))
}
