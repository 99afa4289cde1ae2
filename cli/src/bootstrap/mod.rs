pub mod helpers;
pub mod ramcharitmanas;
pub mod valmiki_ramayana;
pub mod rigveda;
pub mod bhagavad_gita;
pub mod mahabharata;
pub mod atharvaveda;
pub mod yajurveda;
pub mod corpus;
pub mod verses_db;

use std::fs;
use std::path::Path;

use anyhow::{Result, Context};
use chrono::{DateTime, Local};
use tracing::debug;

use sanatan_backend::types::Verse;
use sanatan_backend::{logger, PipelinePaths};

pub use corpus::{CorpusAggregator, AggregateReport, VerseJsonWriter};
pub use verses_db::{VersesDbBootstrap, MaterializeReport};

/// The source corpora of the DharmicData collection, one adapter each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Ramcharitmanas,
    ValmikiRamayana,
    Rigveda,
    BhagavadGita,
    Mahabharata,
    AtharvaVeda,
    YajurvedaKanva,
    YajurvedaMadhyandina,
}

/// Source folders under the input directory, in the order they are written
/// to the merged corpus.
pub const SOURCE_FOLDERS: [(&str, SourceKind); 8] = [
    ("Ramcharitmanas", SourceKind::Ramcharitmanas),
    ("ValmikiRamayana", SourceKind::ValmikiRamayana),
    ("Rigveda", SourceKind::Rigveda),
    ("SrimadBhagvadGita", SourceKind::BhagavadGita),
    ("Mahabharata/Critical Edition", SourceKind::Mahabharata),
    ("AtharvaVeda", SourceKind::AtharvaVeda),
    ("Yajurveda/kanva", SourceKind::YajurvedaKanva),
    ("Yajurveda/madhyandina", SourceKind::YajurvedaMadhyandina),
];

impl SourceKind {
    pub fn book_name(&self) -> &'static str {
        match self {
            SourceKind::Ramcharitmanas => ramcharitmanas::BOOK_NAME,
            SourceKind::ValmikiRamayana => valmiki_ramayana::BOOK_NAME,
            SourceKind::Rigveda => rigveda::BOOK_NAME,
            SourceKind::BhagavadGita => bhagavad_gita::BOOK_NAME,
            SourceKind::Mahabharata => mahabharata::BOOK_NAME,
            SourceKind::AtharvaVeda => atharvaveda::BOOK_NAME,
            SourceKind::YajurvedaKanva | SourceKind::YajurvedaMadhyandina => yajurveda::BOOK_NAME,
        }
    }

    /// Maps the decoded content of one source file to canonical verses.
    ///
    /// Entries without text are dropped, so every returned verse has a
    /// non-empty book name and original text.
    pub fn parse_str(&self, json: &str, source_file: &str) -> Result<Vec<Verse>> {
        let verses = match self {
            SourceKind::Ramcharitmanas => ramcharitmanas::parse_verses(json, source_file)?,
            SourceKind::ValmikiRamayana => valmiki_ramayana::parse_verses(json, source_file)?,
            SourceKind::Rigveda => rigveda::parse_verses(json, source_file)?,
            SourceKind::BhagavadGita => bhagavad_gita::parse_verses(json, source_file)?,
            SourceKind::Mahabharata => mahabharata::parse_verses(json, source_file)?,
            SourceKind::AtharvaVeda => atharvaveda::parse_verses(json, source_file)?,
            SourceKind::YajurvedaKanva => yajurveda::parse_kanva_verses(json, source_file)?,
            SourceKind::YajurvedaMadhyandina => yajurveda::parse_madhyandina_verses(json, source_file)?,
        };

        let total = verses.len();
        let verses: Vec<Verse> = verses.into_iter().filter(|v| v.has_content()).collect();
        if verses.len() < total {
            debug!("{}: dropped {} entries without text", source_file, total - verses.len());
        }

        Ok(verses)
    }

    /// Reads and maps one source file. `source_file` is recorded in each verse's metadata.
    pub fn parse_file(&self, path: &Path, source_file: &str) -> Result<Vec<Verse>> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))?;

        self.parse_str(&json, source_file)
            .with_context(|| format!("Failed to parse source file: {}", path.display()))
    }
}

#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub aggregate: AggregateReport,
    pub materialize: MaterializeReport,
}

/// Runs the whole pipeline: source folders to merged JSON, merged JSON to the
/// viewer's database.
pub fn bootstrap(paths: &PipelinePaths) -> Result<BootstrapReport> {
    ensure_directory_exists(
        paths.log_file
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Invalid log file path"))?
    )?;
    logger::set_log_file(&paths.log_file);

    logger::info("=== bootstrap() ===");

    let start_time: DateTime<Local> = Local::now();

    if !paths.input_dir.exists() {
        logger::warn(&format!("Input directory not found: {}", paths.input_dir.display()));
        logger::warn("Clone https://github.com/bhavykhatri/DharmicData.git into raw_data/");
    }

    logger::info("=== Create merged JSON corpus ===");

    let aggregator = CorpusAggregator::new(paths.input_dir.clone());
    let aggregate = aggregator.write_merged_json(&paths.merged_json)?;

    logger::info("=== Create verses database ===");

    let mut db_bootstrap = VersesDbBootstrap::new(paths.merged_json.clone(), paths.database.clone());
    let materialize = db_bootstrap.run()?;

    logger::info("=== Bootstrap completed ===");

    let end_time = Local::now();
    let duration = (end_time - start_time).to_std().unwrap_or_default();

    let msg = format!(
r#"
======
Bootstrap started: {}
Bootstrap ended:   {}
Duration:          {}
Verses written:    {}
Rows inserted:     {}
Database size:     {} bytes
"#,
        start_time.format("%Y-%m-%d %H:%M:%S"),
        end_time.format("%Y-%m-%d %H:%M:%S"),
        logger::format_duration(duration),
        aggregate.total_verses(),
        materialize.rows_inserted,
        materialize.db_size_bytes,
    );

    logger::info(&msg);

    Ok(BootstrapReport { aggregate, materialize })
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}
