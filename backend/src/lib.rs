pub mod types;
pub mod logger;
pub mod db;

use std::env;
use std::path::{Path, PathBuf};

/// Row id of the single compatibility marker row.
pub const SCHEMA_MARKER_ID: i32 = 42;

/// Schema identity hash the viewer's data-access layer checks when it opens
/// the database. Must equal the hash generated for the viewer's current
/// entity definitions, there is no check that the two agree.
pub const SCHEMA_IDENTITY_HASH: &str = "eb1be500c007349304f9806590a3a4fe";

/// Maximum number of rows a substring search returns.
pub const SEARCH_RESULTS_CAP: i64 = 100;

/// Project root, from SANATAN_PROJECT_DIR or the current directory.
pub fn get_project_dir() -> PathBuf {
    match env::var("SANATAN_PROJECT_DIR") {
        Ok(s) if !s.is_empty() => PathBuf::from(s),
        _ => PathBuf::from("."),
    }
}

/// The fixed input and output locations of a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    /// Root of the DharmicData checkout, one sub-folder per source corpus.
    pub input_dir: PathBuf,
    /// Merged JSON corpus.
    pub merged_json: PathBuf,
    /// Generated SQLite database shipped with the viewer.
    pub database: PathBuf,
    /// log.txt of the run.
    pub log_file: PathBuf,
}

impl PipelinePaths {
    pub fn new(project_dir: &Path) -> Self {
        // Clone https://github.com/bhavykhatri/DharmicData.git into raw_data/
        PipelinePaths {
            input_dir: project_dir.join("raw_data/DharmicData"),
            merged_json: project_dir.join("raw-data-processor/src/main/assets/sanatan_texts.json"),
            database: project_dir.join("app/src/main/assets/databases/sanatan_texts.db"),
            log_file: project_dir.join("log.txt"),
        }
    }

    pub fn from_env() -> Self {
        Self::new(&get_project_dir())
    }
}
