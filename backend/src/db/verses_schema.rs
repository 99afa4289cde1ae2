// Column names follow the viewer's entity fields, see migrations/verses/up.sql

diesel::table! {
    verses (id) {
        id -> Integer,
        #[sql_name = "bookName"]
        book_name -> Text,
        #[sql_name = "majorDivision"]
        major_division -> Nullable<Text>,
        #[sql_name = "minorDivision"]
        minor_division -> Nullable<Text>,
        #[sql_name = "verseIdentifier"]
        verse_identifier -> Nullable<Text>,
        #[sql_name = "originalText"]
        original_text -> Text,
        #[sql_name = "commentariesJson"]
        commentaries_json -> Nullable<Text>,
        #[sql_name = "translationsJson"]
        translations_json -> Nullable<Text>,
        metadata -> Nullable<Text>,
    }
}

diesel::table! {
    schema_marker (id) {
        id -> Integer,
        identity_hash -> Nullable<Text>,
    }
}
