use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

use sanatan_backend::types::{Verse, VerseMetadata};

use crate::bootstrap::helpers::{numbered_label, ADHYAYA, SHLOKA};

pub const BOOK_NAME: &str = "श्रीमद भागवत गीता";

#[derive(Debug, Deserialize)]
struct BhagavadGitaFile {
    #[serde(rename = "BhagavadGitaChapter")]
    verses: Vec<BhagavadGitaVerse>,
}

/// Commentaries and translations are keyed by author name and kept in file order.
#[derive(Debug, Deserialize)]
struct BhagavadGitaVerse {
    chapter: u32,
    verse: u32,
    text: String,
    commentaries: Option<IndexMap<String, String>>,
    translations: Option<IndexMap<String, String>>,
}

pub fn parse_verses(json: &str, source_file: &str) -> Result<Vec<Verse>> {
    let data: BhagavadGitaFile = serde_json::from_str(json)
        .context("Failed to decode Bhagavad Gita chapter")?;

    info!("{}: {} verses", source_file, data.verses.len());

    let metadata = VerseMetadata::with_source_file(source_file).to_json()?;

    data.verses.iter().map(|entry| -> Result<Verse> {
        let mut verse = Verse::new(BOOK_NAME, &entry.text)
            .major_division(numbered_label(ADHYAYA, entry.chapter))
            .minor_division(numbered_label(SHLOKA, entry.verse))
            .metadata(metadata.clone());

        if let Some(commentaries) = &entry.commentaries {
            verse = verse.commentaries_json(serde_json::to_string(commentaries)?);
        }
        if let Some(translations) = &entry.translations {
            verse = verse.translations_json(serde_json::to_string(translations)?);
        }

        Ok(verse)
    }).collect()
}
