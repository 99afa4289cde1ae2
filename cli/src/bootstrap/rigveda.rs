use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use sanatan_backend::types::{Verse, VerseMetadata};

use crate::bootstrap::helpers::{numbered_label, MANDALA, SUKTA};

pub const BOOK_NAME: &str = "ऋग्वेद";

#[derive(Debug, Deserialize)]
struct RigvedaEntry {
    mandala: u32,
    sukta: u32,
    text: String,
}

pub fn parse_verses(json: &str, source_file: &str) -> Result<Vec<Verse>> {
    let entries: Vec<RigvedaEntry> = serde_json::from_str(json)
        .context("Failed to decode Rigveda entries")?;

    info!("{}: {} verses", source_file, entries.len());

    let metadata = VerseMetadata::with_source_file(source_file).to_json()?;

    Ok(entries.iter().map(|entry| {
        Verse::new(BOOK_NAME, &entry.text)
            .major_division(numbered_label(MANDALA, entry.mandala))
            .minor_division(numbered_label(SUKTA, entry.sukta))
            .metadata(metadata.clone())
    }).collect())
}
