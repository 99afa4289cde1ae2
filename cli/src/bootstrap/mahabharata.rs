//! Mahabharata critical edition.
//!
//! The source is a single JSON object keyed by line. Each line of each verse
//! is tagged by a key of the form `BBCCCVVVh`:
//!
//! - `BB` book (parva) number, Ādi (01) to Svargārohaṇa (18)
//! - `CCC` chapter (adhyaya) number
//! - `VVV` verse number
//! - `h` optional ślokārdha marker, `a` for the first half and `c` for the
//!   second half of the śloka. Without it the line is prose or dialogue,
//!   e.g. `जनमेजय उवाच`.

use std::ops::Range;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use sanatan_backend::types::{Verse, VerseMetadata};

use crate::bootstrap::helpers::{numbered_label, parva_label, ADHYAYA, SHLOKA, LABEL_SEPARATOR};

pub const BOOK_NAME: &str = "महाभारत";

pub const FIRST_HALF: &str = "प्रथम अर्ध";
pub const SECOND_HALF: &str = "द्वितीय अर्ध";
pub const PROSE_LINE: &str = "अनुच्छेद / संवाद";

const KEY_MIN_LEN: usize = 8;
const KEY_MAX_LEN: usize = 9;

#[derive(Debug, Deserialize)]
struct MahabharataEntry {
    text: MahabharataText,
}

/// The same line in Devanagari, IAST and ASCII transliteration.
#[derive(Debug, Deserialize)]
struct MahabharataText {
    ud: String,
    ur: String,
    ascii: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("Key '{0}' is shorter than 8 characters")]
    TooShort(String),
    #[error("Key '{0}' is longer than 9 characters")]
    TooLong(String),
    #[error("Key '{key}' has a non-numeric {field} number")]
    InvalidNumber { key: String, field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MahabharataKey {
    pub book: u32,
    pub chapter: u32,
    pub verse: u32,
    pub half: Option<char>,
}

impl MahabharataKey {
    pub fn is_verse(&self) -> bool {
        matches!(self.half, Some('a') | Some('c'))
    }

    pub fn parva_label(&self) -> &'static str {
        parva_label(self.book)
    }

    pub fn adhyaya_label(&self) -> String {
        numbered_label(ADHYAYA, self.chapter)
    }

    /// श्लोक 1 • द्वितीय अर्ध for a half-verse, अनुच्छेद / संवाद otherwise.
    pub fn verse_identifier(&self) -> String {
        let half = match self.half {
            Some('a') => FIRST_HALF,
            Some('c') => SECOND_HALF,
            _ => return PROSE_LINE.to_string(),
        };
        format!("{}{}{}", numbered_label(SHLOKA, self.verse), LABEL_SEPARATOR, half)
    }
}

/// Parses a fixed-width key of eight digits and an optional half marker.
pub fn parse_mahabharata_key(key: &str) -> Result<MahabharataKey, KeyParseError> {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() < KEY_MIN_LEN {
        return Err(KeyParseError::TooShort(key.to_string()));
    }
    if chars.len() > KEY_MAX_LEN {
        return Err(KeyParseError::TooLong(key.to_string()));
    }

    let number = |range: Range<usize>, field: &'static str| -> Result<u32, KeyParseError> {
        let digits = &chars[range];
        let invalid = || KeyParseError::InvalidNumber { key: key.to_string(), field };
        if !digits.iter().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        digits.iter().collect::<String>().parse().map_err(|_| invalid())
    };

    Ok(MahabharataKey {
        book: number(0..2, "book")?,
        chapter: number(2..5, "chapter")?,
        verse: number(5..8, "verse")?,
        half: chars.get(8).copied(),
    })
}

/// Lines are emitted in file order. Lines with a malformed key are skipped.
pub fn parse_verses(json: &str, source_file: &str) -> Result<Vec<Verse>> {
    let lines: IndexMap<String, MahabharataEntry> = serde_json::from_str(json)
        .context("Failed to decode Mahabharata lines")?;

    info!("{}: {} lines", source_file, lines.len());

    let mut verses = Vec::with_capacity(lines.len());

    for (raw_key, entry) in lines.iter() {
        let key = match parse_mahabharata_key(raw_key) {
            Ok(k) => k,
            Err(e) => {
                warn!("{}: skipping line: {}", source_file, e);
                continue;
            }
        };

        let metadata = VerseMetadata {
            raw_key: Some(raw_key.clone()),
            iast: Some(entry.text.ur.clone()),
            ascii: Some(entry.text.ascii.clone()),
            is_verse: Some(key.is_verse()),
            ..VerseMetadata::with_source_file(source_file)
        };

        verses.push(
            Verse::new(BOOK_NAME, &entry.text.ud)
                .major_division(key.parva_label())
                .minor_division(key.adhyaya_label())
                .verse_identifier(key.verse_identifier())
                .metadata(metadata.to_json()?)
        );
    }

    Ok(verses)
}
