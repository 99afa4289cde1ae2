use serde::{Serialize, Deserialize};

/// The canonical verse record every source corpus is normalized into.
///
/// Serialized field names are the camelCase names expected in the merged
/// JSON corpus (`bookName`, `originalText`, ...). Absent optional fields are
/// omitted on write and decode back to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    pub book_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_division: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor_division: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_identifier: Option<String>,
    pub original_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentaries_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

impl Verse {
    pub fn new(book_name: &str, original_text: &str) -> Self {
        Verse {
            book_name: book_name.to_string(),
            major_division: None,
            minor_division: None,
            verse_identifier: None,
            original_text: original_text.to_string(),
            commentaries_json: None,
            translations_json: None,
            metadata: None,
        }
    }

    pub fn major_division(mut self, label: impl Into<String>) -> Self {
        self.major_division = Some(label.into());
        self
    }

    pub fn minor_division(mut self, label: impl Into<String>) -> Self {
        self.minor_division = Some(label.into());
        self
    }

    pub fn verse_identifier(mut self, label: impl Into<String>) -> Self {
        self.verse_identifier = Some(label.into());
        self
    }

    pub fn commentaries_json(mut self, json: String) -> Self {
        self.commentaries_json = Some(json);
        self
    }

    pub fn translations_json(mut self, json: String) -> Self {
        self.translations_json = Some(json);
        self
    }

    pub fn metadata(mut self, json: String) -> Self {
        self.metadata = Some(json);
        self
    }

    /// Both required fields carry visible content.
    pub fn has_content(&self) -> bool {
        !self.book_name.trim().is_empty() && !self.original_text.trim().is_empty()
    }
}

/// Source-specific auxiliary fields, stored as a JSON string in `Verse::metadata`.
///
/// Only the keys a source actually provides are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseMetadata {
    /// Ramcharitmanas verse type, e.g. श्लोक, दोहा, चौपाई
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub verse_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kaanda: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samhita: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascii: Option<String>,
    #[serde(rename = "isVerse", default, skip_serializing_if = "Option::is_none")]
    pub is_verse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

impl VerseMetadata {
    pub fn with_source_file(source_file: &str) -> Self {
        VerseMetadata {
            source_file: Some(source_file.to_string()),
            ..Default::default()
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
