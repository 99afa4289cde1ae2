use diesel::prelude::*;
use serde::Serialize;

use crate::db::verses_schema::*;
use crate::types::Verse;

/// A materialized verse, with the surrogate id used as the list row key.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq, Serialize)]
#[diesel(table_name = verses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct VerseRow {
    pub id: i32,
    pub book_name: String,
    pub major_division: Option<String>,
    pub minor_division: Option<String>,
    pub verse_identifier: Option<String>,
    pub original_text: String,
    pub commentaries_json: Option<String>,
    pub translations_json: Option<String>,
    pub metadata: Option<String>,
}

impl VerseRow {
    /// Drops the surrogate id.
    pub fn to_verse(&self) -> Verse {
        Verse {
            book_name: self.book_name.clone(),
            major_division: self.major_division.clone(),
            minor_division: self.minor_division.clone(),
            verse_identifier: self.verse_identifier.clone(),
            original_text: self.original_text.clone(),
            commentaries_json: self.commentaries_json.clone(),
            translations_json: self.translations_json.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = verses)]
pub struct NewVerse<'a> {
    pub book_name: &'a str,
    pub major_division: Option<&'a str>,
    pub minor_division: Option<&'a str>,
    pub verse_identifier: Option<&'a str>,
    pub original_text: &'a str,
    pub commentaries_json: Option<&'a str>,
    pub translations_json: Option<&'a str>,
    pub metadata: Option<&'a str>,
}

impl<'a> From<&'a Verse> for NewVerse<'a> {
    fn from(verse: &'a Verse) -> Self {
        NewVerse {
            book_name: &verse.book_name,
            major_division: verse.major_division.as_deref(),
            minor_division: verse.minor_division.as_deref(),
            verse_identifier: verse.verse_identifier.as_deref(),
            original_text: &verse.original_text,
            commentaries_json: verse.commentaries_json.as_deref(),
            translations_json: verse.translations_json.as_deref(),
            metadata: verse.metadata.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = schema_marker)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SchemaMarker {
    pub id: i32,
    pub identity_hash: Option<String>,
}
