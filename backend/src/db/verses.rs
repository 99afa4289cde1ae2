use diesel::prelude::*;
use diesel::connection::SimpleConnection;
use diesel::sql_query;
use diesel::sql_types::Text;
use anyhow::Result;

use crate::db::verses_models::*;
use crate::db::verses_schema::{verses, schema_marker};
use crate::db::DatabaseHandle;
use crate::{SCHEMA_IDENTITY_HASH, SCHEMA_MARKER_ID, SEARCH_RESULTS_CAP};

pub static VERSES_SCHEMA_SQL: &str = include_str!("../../migrations/verses/up.sql");

pub static SEARCH_INDEX_NAME: &str = "idx_search";

pub type VersesDbHandle = DatabaseHandle;

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

/// `%query%` with LIKE wildcards in the query escaped by backslash.
fn contains_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

impl VersesDbHandle {
    /// All verses of a book, exact name match, in corpus order.
    pub fn get_verses_by_book(&self, book: &str) -> Result<Vec<VerseRow>> {
        use crate::db::verses_schema::verses::dsl::*;

        self.do_read(|db_conn| {
            verses
                .filter(book_name.eq(book))
                .order(id.asc())
                .select(VerseRow::as_select())
                .load(db_conn)
        })
    }

    /// Verses of one major division of a book, e.g. one parva of the Mahabharata.
    pub fn get_verses_by_division(&self, book: &str, division: &str) -> Result<Vec<VerseRow>> {
        use crate::db::verses_schema::verses::dsl::*;

        self.do_read(|db_conn| {
            verses
                .filter(book_name.eq(book))
                .filter(major_division.eq(division))
                .order(id.asc())
                .select(VerseRow::as_select())
                .load(db_conn)
        })
    }

    /// Substring search over the original text of all books, capped at SEARCH_RESULTS_CAP.
    pub fn search_verses(&self, query: &str) -> Result<Vec<VerseRow>> {
        self.search_verses_with_limit(query, SEARCH_RESULTS_CAP)
    }

    pub fn search_verses_with_limit(&self, query: &str, limit: i64) -> Result<Vec<VerseRow>> {
        use crate::db::verses_schema::verses::dsl::*;

        // The viewer shows a book listing for an empty query, not a search.
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let pattern = contains_pattern(query);

        self.do_read(|db_conn| {
            verses
                .filter(original_text.like(pattern).escape('\\'))
                .order(id.asc())
                .limit(limit)
                .select(VerseRow::as_select())
                .load(db_conn)
        })
    }

    pub fn count_verses(&self) -> Result<i64> {
        self.do_read(|db_conn| verses::table.count().get_result(db_conn))
    }

    /// Distinct book names, in corpus order.
    pub fn get_book_names(&self) -> Result<Vec<String>> {
        let rows: Vec<NameRow> = self.do_read(|db_conn| {
            sql_query("SELECT bookName AS name FROM verses GROUP BY bookName ORDER BY MIN(id)")
                .load(db_conn)
        })?;
        Ok(rows.into_iter().map(|r| r.name).collect())
    }

    pub fn get_schema_marker(&self) -> Result<Vec<SchemaMarker>> {
        self.do_read(|db_conn| {
            schema_marker::table
                .select(SchemaMarker::as_select())
                .load(db_conn)
        })
    }

    pub fn get_schema_identity_hash(&self) -> Result<Option<String>> {
        let marker = self.do_read(|db_conn| {
            schema_marker::table
                .filter(schema_marker::id.eq(SCHEMA_MARKER_ID))
                .select(SchemaMarker::as_select())
                .first(db_conn)
                .optional()
        })?;
        Ok(marker.and_then(|m| m.identity_hash))
    }

    /// Names of the indexes defined on the verses table.
    pub fn get_index_names(&self) -> Result<Vec<String>> {
        let rows: Vec<NameRow> = self.do_read(|db_conn| {
            sql_query("SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'verses' ORDER BY name")
                .load(db_conn)
        })?;
        Ok(rows.into_iter().map(|r| r.name).collect())
    }
}

pub fn create_verses_table(db_conn: &mut SqliteConnection) -> QueryResult<()> {
    db_conn.batch_execute(VERSES_SCHEMA_SQL)
}

pub fn insert_verses_batch(db_conn: &mut SqliteConnection, new_verses: &[NewVerse]) -> QueryResult<usize> {
    diesel::insert_into(verses::table)
        .values(new_verses)
        .execute(db_conn)
}

/// Index for the fetch-by-book and fetch-by-division queries. Created after the bulk load.
pub fn create_search_index(db_conn: &mut SqliteConnection) -> QueryResult<usize> {
    sql_query(format!(
        "CREATE INDEX IF NOT EXISTS {} ON verses(bookName, majorDivision)",
        SEARCH_INDEX_NAME
    ))
    .execute(db_conn)
}

/// Creates the marker table if needed and upserts the single identity row.
pub fn write_schema_marker(db_conn: &mut SqliteConnection) -> QueryResult<usize> {
    sql_query("CREATE TABLE IF NOT EXISTS schema_marker (id INTEGER PRIMARY KEY, identity_hash TEXT)")
        .execute(db_conn)?;

    diesel::replace_into(schema_marker::table)
        .values((
            schema_marker::id.eq(SCHEMA_MARKER_ID),
            schema_marker::identity_hash.eq(SCHEMA_IDENTITY_HASH),
        ))
        .execute(db_conn)
}
