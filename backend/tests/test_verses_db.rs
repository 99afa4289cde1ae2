use std::path::Path;

use tempfile::TempDir;

use sanatan_backend::db::{establish_connection, VersesDbHandle};
use sanatan_backend::db::verses::{create_verses_table, insert_verses_batch, create_search_index, write_schema_marker, SEARCH_INDEX_NAME};
use sanatan_backend::db::verses_models::NewVerse;
use sanatan_backend::types::Verse;
use sanatan_backend::{SCHEMA_IDENTITY_HASH, SCHEMA_MARKER_ID, SEARCH_RESULTS_CAP};

fn gita_verse(chapter: u32, verse: u32, text: &str) -> Verse {
    Verse::new("श्रीमद भागवत गीता", text)
        .major_division(format!("अध्याय {}", chapter))
        .minor_division(format!("श्लोक {}", verse))
}

fn create_test_db(db_path: &Path, rows: &[Verse]) {
    let mut conn = establish_connection(db_path).unwrap();
    create_verses_table(&mut conn).unwrap();

    let new_verses: Vec<NewVerse> = rows.iter().map(NewVerse::from).collect();
    for chunk in new_verses.chunks(50) {
        insert_verses_batch(&mut conn, chunk).unwrap();
    }

    create_search_index(&mut conn).unwrap();
    write_schema_marker(&mut conn).unwrap();
}

fn sample_rows() -> Vec<Verse> {
    vec![
        gita_verse(1, 1, "धृतराष्ट्र उवाच\n\nधर्मक्षेत्रे कुरुक्षेत्रे समवेता युयुत्सवः।"),
        gita_verse(1, 2, "सञ्जय उवाच\n\nदृष्ट्वा तु पाण्डवानीकं व्यूढं दुर्योधनस्तदा।"),
        gita_verse(2, 47, "कर्मण्येवाधिकारस्ते मा फलेषु कदाचन।"),
        Verse::new("महाभारत", "जनमेजय उवाच\n")
            .major_division("आदी पर्व")
            .minor_division("अध्याय 1")
            .verse_identifier("अनुच्छेद / संवाद"),
        Verse::new("ऋग्वेद", "अग्निमीळे पुरोहितं यज्ञस्य देवमृत्विजम्।")
            .major_division("मण्डल 1")
            .minor_division("सूक्त 1"),
    ]
}

#[test]
fn test_get_verses_by_book() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("verses.db");
    create_test_db(&db_path, &sample_rows());

    let db = VersesDbHandle::open(&db_path).unwrap();

    let gita = db.get_verses_by_book("श्रीमद भागवत गीता").unwrap();
    assert_eq!(gita.len(), 3);
    assert!(gita.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(gita[2].major_division.as_deref(), Some("अध्याय 2"));

    // Exact match only
    assert!(db.get_verses_by_book("गीता").unwrap().is_empty());
}

#[test]
fn test_get_verses_by_division() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("verses.db");
    create_test_db(&db_path, &sample_rows());

    let db = VersesDbHandle::open(&db_path).unwrap();

    let chapter_one = db.get_verses_by_division("श्रीमद भागवत गीता", "अध्याय 1").unwrap();
    assert_eq!(chapter_one.len(), 2);

    let adi = db.get_verses_by_division("महाभारत", "आदी पर्व").unwrap();
    assert_eq!(adi.len(), 1);
    assert_eq!(adi[0].to_verse(), sample_rows()[3]);
}

#[test]
fn test_search_verses_substring() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("verses.db");
    create_test_db(&db_path, &sample_rows());

    let db = VersesDbHandle::open(&db_path).unwrap();

    let results = db.search_verses("उवाच").unwrap();
    assert_eq!(results.len(), 3);
    let books: Vec<&str> = results.iter().map(|r| r.book_name.as_str()).collect();
    assert!(books.contains(&"महाभारत"));

    assert!(db.search_verses("xyz").unwrap().is_empty());
    assert!(db.search_verses("  ").unwrap().is_empty());
    // LIKE wildcards are matched literally
    assert!(db.search_verses("%").unwrap().is_empty());
}

#[test]
fn test_search_verses_is_capped() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("verses.db");

    let total = SEARCH_RESULTS_CAP as u32 + 25;
    let rows: Vec<Verse> = (1..=total)
        .map(|n| gita_verse(18, n, &format!("श्रीभगवानुवाच {}", n)))
        .collect();
    create_test_db(&db_path, &rows);

    let db = VersesDbHandle::open(&db_path).unwrap();
    assert_eq!(db.count_verses().unwrap(), total as i64);

    let results = db.search_verses("श्रीभगवानुवाच").unwrap();
    assert_eq!(results.len() as i64, SEARCH_RESULTS_CAP);

    let results = db.search_verses_with_limit("श्रीभगवानुवाच", 10).unwrap();
    assert_eq!(results.len(), 10);
    assert_eq!(results[0].original_text, "श्रीभगवानुवाच 1");
}

#[test]
fn test_index_and_schema_marker() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("verses.db");
    create_test_db(&db_path, &sample_rows());

    // Writing the marker again keeps a single row
    let mut conn = establish_connection(&db_path).unwrap();
    write_schema_marker(&mut conn).unwrap();
    drop(conn);

    let db = VersesDbHandle::open(&db_path).unwrap();

    assert!(db.get_index_names().unwrap().contains(&SEARCH_INDEX_NAME.to_string()));

    let markers = db.get_schema_marker().unwrap();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].id, SCHEMA_MARKER_ID);
    assert_eq!(db.get_schema_identity_hash().unwrap().as_deref(), Some(SCHEMA_IDENTITY_HASH));
}

#[test]
fn test_get_book_names_in_corpus_order() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("verses.db");
    create_test_db(&db_path, &sample_rows());

    let db = VersesDbHandle::open(&db_path).unwrap();
    assert_eq!(db.get_book_names().unwrap(), vec!["श्रीमद भागवत गीता", "महाभारत", "ऋग्वेद"]);
}

#[test]
fn test_open_missing_database() {
    let temp_dir = TempDir::new().unwrap();
    assert!(VersesDbHandle::open(&temp_dir.path().join("missing.db")).is_err());
}
