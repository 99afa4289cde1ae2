use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use sanatan_backend::types::{Verse, VerseMetadata};

use crate::bootstrap::helpers::{yajur_samhita_label, numbered_label, ADHYAYA};

pub const BOOK_NAME: &str = "यजुर्वेद";

/// Vajasaneyi Kanva samhita numbers its chapters as `chapter`.
#[derive(Debug, Deserialize)]
struct KanvaEntry {
    samhita: String,
    chapter: u32,
    text: String,
}

/// Vajasaneyi Madhyandina samhita numbers its chapters as `adhyaya`.
#[derive(Debug, Deserialize)]
struct MadhyandinaEntry {
    samhita: String,
    adhyaya: u32,
    text: String,
}

fn yajurveda_verse(samhita: &str, chapter: u32, text: &str, source_file: &str) -> Result<Verse> {
    let metadata = VerseMetadata {
        samhita: Some(samhita.to_string()),
        ..VerseMetadata::with_source_file(source_file)
    };

    Ok(Verse::new(BOOK_NAME, text)
        .major_division(yajur_samhita_label(samhita))
        .minor_division(numbered_label(ADHYAYA, chapter))
        .metadata(metadata.to_json()?))
}

pub fn parse_kanva_verses(json: &str, source_file: &str) -> Result<Vec<Verse>> {
    let entries: Vec<KanvaEntry> = serde_json::from_str(json)
        .context("Failed to decode Yajurveda Kanva entries")?;

    info!("{}: {} verses", source_file, entries.len());

    entries.iter()
        .map(|e| yajurveda_verse(&e.samhita, e.chapter, &e.text, source_file))
        .collect()
}

pub fn parse_madhyandina_verses(json: &str, source_file: &str) -> Result<Vec<Verse>> {
    let entries: Vec<MadhyandinaEntry> = serde_json::from_str(json)
        .context("Failed to decode Yajurveda Madhyandina entries")?;

    info!("{}: {} verses", source_file, entries.len());

    entries.iter()
        .map(|e| yajurveda_verse(&e.samhita, e.adhyaya, &e.text, source_file))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kanva_verses() {
        let json = r#"[
            {"veda": "yajurveda", "samhita": "vajasneyi-kanva-samhita", "chapter": 2, "text": "इषे त्वोर्जे त्वा"}
        ]"#;

        let verses = parse_kanva_verses(json, "Yajurveda/kanva/kanva_2.json").unwrap();
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].book_name, BOOK_NAME);
        assert_eq!(verses[0].major_division.as_deref(), Some("वाजसनेयी काण्व"));
        assert_eq!(verses[0].minor_division.as_deref(), Some("अध्याय 2"));
    }

    #[test]
    fn test_parse_madhyandina_verses() {
        let json = r#"[
            {"veda": "yajurveda", "samhita": "vajasneyi-madhyandina-samhita", "adhyaya": 1, "text": "इषे त्वा"}
        ]"#;

        let verses = parse_madhyandina_verses(json, "Yajurveda/madhyandina/m_1.json").unwrap();
        assert_eq!(verses[0].major_division.as_deref(), Some("वाजसनेयी मध्यदीन"));
        assert_eq!(verses[0].minor_division.as_deref(), Some("अध्याय 1"));

        // The Madhyandina shape has no `chapter` field
        assert!(parse_kanva_verses(json, "x.json").is_err());
    }
}
