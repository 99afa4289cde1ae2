use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use sanatan_backend::types::{Verse, VerseMetadata};

use crate::bootstrap::helpers::{atharva_samhita_label, numbered_label, KAANDA, SUKTA, LABEL_SEPARATOR};

pub const BOOK_NAME: &str = "अथर्ववेद";

#[derive(Debug, Deserialize)]
struct AtharvaVedaEntry {
    samhita: String,
    kaanda: u32,
    sukta: u32,
    text: String,
}

/// The major division combines samhita and kaanda, e.g. शौनक • काण्ड 1
pub fn parse_verses(json: &str, source_file: &str) -> Result<Vec<Verse>> {
    let entries: Vec<AtharvaVedaEntry> = serde_json::from_str(json)
        .context("Failed to decode Atharvaveda entries")?;

    info!("{}: {} verses", source_file, entries.len());

    entries.iter().map(|entry| -> Result<Verse> {
        let metadata = VerseMetadata {
            samhita: Some(entry.samhita.clone()),
            ..VerseMetadata::with_source_file(source_file)
        };

        let major = format!(
            "{}{}{}",
            atharva_samhita_label(&entry.samhita),
            LABEL_SEPARATOR,
            numbered_label(KAANDA, entry.kaanda),
        );

        Ok(Verse::new(BOOK_NAME, &entry.text)
            .major_division(major)
            .minor_division(numbered_label(SUKTA, entry.sukta))
            .metadata(metadata.to_json()?))
    }).collect()
}
