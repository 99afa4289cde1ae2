use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use sanatan_backend::types::{Verse, VerseMetadata};

pub const BOOK_NAME: &str = "रामचरितमानस";

/// One entry of a Ramcharitmanas kaand file. The kaand name is already in Devanagari.
#[derive(Debug, Deserialize)]
struct RamcharitmanasEntry {
    #[serde(rename = "type")]
    verse_type: String,
    content: String,
    kaand: String,
}

/// The verse identifier is the 1-based position of the entry within its file.
pub fn parse_verses(json: &str, source_file: &str) -> Result<Vec<Verse>> {
    let entries: Vec<RamcharitmanasEntry> = serde_json::from_str(json)
        .context("Failed to decode Ramcharitmanas entries")?;

    info!("{}: {} verses", source_file, entries.len());

    entries.iter().enumerate().map(|(i, entry)| -> Result<Verse> {
        let metadata = VerseMetadata {
            verse_type: Some(entry.verse_type.clone()),
            ..VerseMetadata::with_source_file(source_file)
        };

        Ok(Verse::new(BOOK_NAME, &entry.content)
            .major_division(entry.kaand.as_str())
            .verse_identifier((i + 1).to_string())
            .metadata(metadata.to_json()?))
    }).collect()
}
