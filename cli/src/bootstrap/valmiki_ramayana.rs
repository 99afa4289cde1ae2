use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use sanatan_backend::types::{Verse, VerseMetadata};

use crate::bootstrap::helpers::{kaanda_label, numbered_label, SARGA, SHLOKA};

pub const BOOK_NAME: &str = "वाल्मीकि रामायण";

#[derive(Debug, Deserialize)]
struct ValmikiRamayanaEntry {
    kaanda: String,
    sarg: u32,
    shloka: u32,
    text: String,
}

pub fn parse_verses(json: &str, source_file: &str) -> Result<Vec<Verse>> {
    let entries: Vec<ValmikiRamayanaEntry> = serde_json::from_str(json)
        .context("Failed to decode Valmiki Ramayana entries")?;

    info!("{}: {} verses", source_file, entries.len());

    entries.iter().map(|entry| -> Result<Verse> {
        let metadata = VerseMetadata {
            kaanda: Some(entry.kaanda.clone()),
            ..VerseMetadata::with_source_file(source_file)
        };

        Ok(Verse::new(BOOK_NAME, &entry.text)
            .major_division(kaanda_label(&entry.kaanda))
            .minor_division(numbered_label(SARGA, entry.sarg))
            .verse_identifier(numbered_label(SHLOKA, entry.shloka))
            .metadata(metadata.to_json()?))
    }).collect()
}
