//! End-to-end runs of the bootstrap over a small DharmicData tree.
//!
//! The tree has a few folders missing, one empty folder and one malformed
//! file, so every run also goes through the skip paths.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use sanatan_backend::db::VersesDbHandle;
use sanatan_backend::db::verses::SEARCH_INDEX_NAME;
use sanatan_backend::db::verses_models::VerseRow;
use sanatan_backend::types::{Verse, VerseMetadata};
use sanatan_backend::{PipelinePaths, SCHEMA_IDENTITY_HASH, SCHEMA_MARKER_ID};

use sanatan_cli::bootstrap::{bootstrap, CorpusAggregator, SOURCE_FOLDERS};
use sanatan_cli::bootstrap::corpus::{read_merged_json, FolderStatus};

fn write_file(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

/// Ramcharitmanas, Rigveda, Bhagavad Gita and Mahabharata have data.
/// AtharvaVeda is empty, the other folders are missing.
fn create_input_tree(input_dir: &Path) {
    write_file(
        &input_dir.join("Ramcharitmanas"),
        "1_बालकाण्ड.json",
        r#"[
            {"type": "श्लोक", "content": "वर्णानामर्थसंघानां रसानां छन्दसामपि।", "kaand": "बालकाण्ड"},
            {"type": "सोरठा", "content": "जो सुमिरत सिधि होइ गन नायक करिबर बदन।", "kaand": "बालकाण्ड"}
        ]"#,
    );

    let rigveda = input_dir.join("Rigveda");
    write_file(
        &rigveda,
        "rigveda_mandala_1.json",
        r#"[
            {"veda": "rigveda", "mandala": 1, "sukta": 1, "text": "अग्निमीळे पुरोहितं यज्ञस्य देवमृत्विजम्।"},
            {"veda": "rigveda", "mandala": 1, "sukta": 2, "text": "वायवा याहि दर्शतेमे सोमा अरंकृताः।"}
        ]"#,
    );
    write_file(&rigveda, "rigveda_mandala_2.json", r#"[{"veda": "rigveda", "mandala": "#);

    write_file(
        &input_dir.join("SrimadBhagvadGita"),
        "bhagavad_gita_chapter_2.json",
        r#"{"BhagavadGitaChapter": [
            {
                "chapter": 2,
                "verse": 47,
                "text": "कर्मण्येवाधिकारस्ते मा फलेषु कदाचन।",
                "commentaries": {"Swami Ramsukhdas": "व्याख्या"},
                "translations": {"swami tejomayananda": "कर्म करने मात्र में तुम्हारा अधिकार है"}
            }
        ]}"#,
    );

    write_file(
        &input_dir.join("Mahabharata/Critical Edition"),
        "MBh.json",
        r#"{
            "01001000": {"text": {"ud": "जनमेजय उवाच\n", "ur": "janamejaya uvāca\n", "ascii": "janamejaya uvAca\n"}},
            "01001001a": {"text": {"ud": "लोमहर्षणपुत्र उग्रश्रवाः सौतिः पौराणिको\n", "ur": "lomaharṣaṇaputra\n", "ascii": "lomaharSaNaputra\n"}},
            "0100": {"text": {"ud": "x", "ur": "x", "ascii": "x"}},
            "18001001c": {"text": {"ud": "स्वर्गं त्रिविष्टपं प्राप्य\n", "ur": "svargaṃ\n", "ascii": "svargaM\n"}}
        }"#,
    );

    fs::create_dir_all(input_dir.join("AtharvaVeda")).unwrap();
}

fn all_rows(db: &VersesDbHandle) -> Vec<VerseRow> {
    db.get_book_names().unwrap()
        .iter()
        .flat_map(|book| db.get_verses_by_book(book).unwrap())
        .collect()
}

const EXPECTED_VERSES: usize = 2 + 2 + 1 + 3;

#[test]
fn test_aggregate_report() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("raw_data/DharmicData");
    create_input_tree(&input_dir);

    let aggregator = CorpusAggregator::new(input_dir);
    let report = aggregator.write_merged_json(&temp_dir.path().join("out/sanatan_texts.json")).unwrap();

    assert_eq!(report.sources.len(), SOURCE_FOLDERS.len());
    assert_eq!(report.total_verses(), EXPECTED_VERSES);
    assert_eq!(report.total_files_failed(), 1);

    assert_eq!(report.source("Rigveda").unwrap().files_processed, 1);
    assert_eq!(report.source("AtharvaVeda").unwrap().status, FolderStatus::Empty);
    assert_eq!(report.source("ValmikiRamayana").unwrap().status, FolderStatus::Missing);
    assert_eq!(report.source("Yajurveda/kanva").unwrap().status, FolderStatus::Missing);
    assert_eq!(report.source("Mahabharata/Critical Edition").unwrap().verses_written, 3);
}

#[test]
fn test_bootstrap_builds_database() {
    let temp_dir = TempDir::new().unwrap();
    let paths = PipelinePaths::new(temp_dir.path());
    create_input_tree(&paths.input_dir);

    let report = bootstrap(&paths).unwrap();
    assert_eq!(report.aggregate.total_verses(), EXPECTED_VERSES);
    assert_eq!(report.materialize.rows_inserted, EXPECTED_VERSES);

    let verses = read_merged_json(&paths.merged_json).unwrap();
    assert_eq!(verses.len(), EXPECTED_VERSES);
    assert!(verses.iter().all(|v| !v.book_name.is_empty() && !v.original_text.is_empty()));

    // Corpus order follows the folder order
    let books: Vec<&str> = verses.iter().map(|v| v.book_name.as_str()).collect();
    assert_eq!(books.first(), Some(&"रामचरितमानस"));
    assert_eq!(books.last(), Some(&"महाभारत"));

    let db = VersesDbHandle::open(&paths.database).unwrap();
    assert_eq!(db.count_verses().unwrap(), EXPECTED_VERSES as i64);
    assert!(db.get_index_names().unwrap().contains(&SEARCH_INDEX_NAME.to_string()));

    let marker = db.get_schema_marker().unwrap();
    assert_eq!(marker.len(), 1);
    assert_eq!(marker[0].id, SCHEMA_MARKER_ID);
    assert_eq!(db.get_schema_identity_hash().unwrap().as_deref(), Some(SCHEMA_IDENTITY_HASH));

    assert_eq!(
        db.get_book_names().unwrap(),
        vec!["रामचरितमानस", "ऋग्वेद", "श्रीमद भागवत गीता", "महाभारत"]
    );

    // Database rows are the merged JSON records, in the same order
    let rows: Vec<Verse> = all_rows(&db).iter().map(|row| row.to_verse()).collect();
    assert_eq!(rows, verses);

    let mbh = db.get_verses_by_division("महाभारत", "उपसंहार / अंतिम पर्व").unwrap();
    assert_eq!(mbh.len(), 1);
    assert_eq!(mbh[0].verse_identifier.as_deref(), Some("श्लोक 1 • द्वितीय अर्ध"));
    let meta: VerseMetadata = serde_json::from_str(mbh[0].metadata.as_deref().unwrap()).unwrap();
    assert_eq!(meta.is_verse, Some(true));
    assert_eq!(meta.source_file.as_deref(), Some("Mahabharata/Critical Edition/MBh.json"));

    let gita = db.search_verses("फलेषु").unwrap();
    assert_eq!(gita.len(), 1);
    assert!(gita[0].commentaries_json.as_deref().unwrap().contains("Swami Ramsukhdas"));
}

#[test]
fn test_bootstrap_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let paths = PipelinePaths::new(temp_dir.path());
    create_input_tree(&paths.input_dir);

    bootstrap(&paths).unwrap();
    let first_json = fs::read(&paths.merged_json).unwrap();
    let first_rows = all_rows(&VersesDbHandle::open(&paths.database).unwrap());

    bootstrap(&paths).unwrap();
    let second_json = fs::read(&paths.merged_json).unwrap();
    let db = VersesDbHandle::open(&paths.database).unwrap();
    let second_rows = all_rows(&db);

    assert_eq!(first_json, second_json);
    assert_eq!(first_rows, second_rows);
    assert_eq!(db.get_schema_marker().unwrap().len(), 1);
}

#[test]
fn test_bootstrap_without_input_writes_empty_database() {
    let temp_dir = TempDir::new().unwrap();
    let paths = PipelinePaths::new(temp_dir.path());

    let report = bootstrap(&paths).unwrap();
    assert_eq!(report.materialize.rows_inserted, 0);
    assert!(report.aggregate.sources.iter().all(|s| s.status == FolderStatus::Missing));

    assert!(read_merged_json(&paths.merged_json).unwrap().is_empty());

    let db = VersesDbHandle::open(&paths.database).unwrap();
    assert_eq!(db.count_verses().unwrap(), 0);
    assert_eq!(db.get_schema_identity_hash().unwrap().as_deref(), Some(SCHEMA_IDENTITY_HASH));
}
