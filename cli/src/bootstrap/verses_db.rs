use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use diesel::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use sanatan_backend::db::establish_connection;
use sanatan_backend::db::verses::{create_verses_table, insert_verses_batch, create_search_index, write_schema_marker};
use sanatan_backend::db::verses_models::NewVerse;
use sanatan_backend::types::Verse;

use crate::bootstrap::corpus::for_each_verse;
use crate::bootstrap::ensure_directory_exists;

/// Rows per multi-row insert statement.
pub const BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    pub rows_inserted: usize,
    pub db_size_bytes: u64,
}

/// Builds the viewer's SQLite database from the merged JSON corpus.
pub struct VersesDbBootstrap {
    json_path: PathBuf,
    output_path: PathBuf,
}

impl VersesDbBootstrap {
    pub fn new(json_path: PathBuf, output_path: PathBuf) -> Self {
        Self { json_path, output_path }
    }

    pub fn create_database(&self) -> Result<SqliteConnection> {
        info!("Creating verses database at: {:?}", self.output_path);

        if self.output_path.exists() {
            info!("Deleting existing database file");
            fs::remove_file(&self.output_path)
                .with_context(|| format!("Failed to remove existing database: {}", self.output_path.display()))?;
        }

        ensure_directory_exists(
            self.output_path
                .parent()
                .ok_or_else(|| anyhow::anyhow!("Invalid database path"))?
        )?;

        let mut conn = establish_connection(&self.output_path)?;
        create_verses_table(&mut conn).context("Failed to create verses table")?;

        Ok(conn)
    }

    /// Inserts every verse of the merged JSON, then creates the search index
    /// and the schema marker. Runs as a single transaction.
    pub fn import_verses(&self, conn: &mut SqliteConnection) -> Result<usize> {
        let file = File::open(&self.json_path)
            .with_context(|| format!("Failed to open merged JSON: {}", self.json_path.display()))?;

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("[{elapsed_precise}] {spinner} {pos} verses {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(120));

        let rows_inserted = conn.transaction::<_, anyhow::Error, _>(|conn| {
            let mut batch: Vec<Verse> = Vec::with_capacity(BATCH_SIZE);
            let mut rows_inserted = 0;

            for_each_verse(BufReader::new(file), |verse| {
                batch.push(verse);
                if batch.len() >= BATCH_SIZE {
                    rows_inserted += insert_batch(conn, &batch)?;
                    pb.set_position(rows_inserted as u64);
                    batch.clear();
                }
                Ok(())
            })?;

            if !batch.is_empty() {
                rows_inserted += insert_batch(conn, &batch)?;
                pb.set_position(rows_inserted as u64);
            }

            pb.set_message("creating index");
            create_search_index(conn).context("Failed to create search index")?;
            write_schema_marker(conn).context("Failed to write schema marker")?;

            Ok(rows_inserted)
        });

        match &rows_inserted {
            Ok(n) => pb.finish_with_message(format!("done, {} rows", n)),
            Err(_) => pb.abandon_with_message("failed"),
        }

        rows_inserted
    }

    /// Deletes and recreates the database. A failed run leaves no database file behind.
    pub fn run(&mut self) -> Result<MaterializeReport> {
        info!("Starting verses database bootstrap");

        let rows_inserted = match self.build() {
            Ok(n) => n,
            Err(e) => {
                if self.output_path.exists() {
                    warn!("Removing partially written database: {:?}", self.output_path);
                    if let Err(remove_err) = fs::remove_file(&self.output_path) {
                        warn!("Failed to remove {:?}: {}", self.output_path, remove_err);
                    }
                }
                return Err(e);
            }
        };

        let db_size_bytes = fs::metadata(&self.output_path)
            .with_context(|| format!("Failed to stat database: {}", self.output_path.display()))?
            .len();

        info!("Verses database bootstrap completed: {} rows, {} bytes", rows_inserted, db_size_bytes);

        Ok(MaterializeReport { rows_inserted, db_size_bytes })
    }

    fn build(&self) -> Result<usize> {
        // The connection is closed at the end of this scope, before the file size is read.
        let mut conn = self.create_database()?;
        self.import_verses(&mut conn)
    }
}

fn insert_batch(conn: &mut SqliteConnection, batch: &[Verse]) -> Result<usize> {
    let rows: Vec<NewVerse> = batch.iter().map(NewVerse::from).collect();
    insert_verses_batch(conn, &rows)
        .with_context(|| format!("Failed to insert batch of {} verses", rows.len()))
}
