use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::{self, DeserializeSeed, Deserializer, SeqAccess, Visitor};
use walkdir::WalkDir;

use sanatan_backend::logger;
use sanatan_backend::types::Verse;

use crate::bootstrap::{ensure_directory_exists, SourceKind, SOURCE_FOLDERS};

/// Writes verses as one JSON array, one record at a time.
///
/// Output is `[`, the records separated by `,` and a newline, then `]`.
/// Nothing is buffered beyond the record being written.
pub struct VerseJsonWriter<W: Write> {
    writer: W,
    count: usize,
}

impl<W: Write> VerseJsonWriter<W> {
    pub fn new(mut writer: W) -> Result<Self> {
        writer.write_all(b"[\n")?;
        Ok(Self { writer, count: 0 })
    }

    pub fn write_verse(&mut self, verse: &Verse) -> Result<()> {
        if self.count > 0 {
            self.writer.write_all(b",\n")?;
        }
        serde_json::to_writer_pretty(&mut self.writer, verse)?;
        self.count += 1;
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Closes the array and flushes. Returns the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.write_all(b"\n]\n")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Visits the elements of a verse array without collecting them.
///
/// An error returned by the callback is kept in `error`, the deserializer
/// only sees a generic abort.
struct ForEachVerse<'a, F> {
    callback: F,
    error: &'a mut Option<anyhow::Error>,
}

impl<'de, 'a, F> DeserializeSeed<'de> for ForEachVerse<'a, F>
where
    F: FnMut(Verse) -> Result<()>,
{
    type Value = usize;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, 'a, F> Visitor<'de> for ForEachVerse<'a, F>
where
    F: FnMut(Verse) -> Result<()>,
{
    type Value = usize;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array of verses")
    }

    fn visit_seq<A>(mut self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut count = 0;
        while let Some(verse) = seq.next_element::<Verse>()? {
            if let Err(e) = (self.callback)(verse) {
                *self.error = Some(e);
                return Err(de::Error::custom("verse callback failed"));
            }
            count += 1;
        }
        Ok(count)
    }
}

/// Decodes a merged JSON corpus element by element, calling `callback` on
/// each verse. Returns the number of verses visited.
pub fn for_each_verse<R, F>(reader: R, callback: F) -> Result<usize>
where
    R: Read,
    F: FnMut(Verse) -> Result<()>,
{
    let mut error = None;
    let mut deserializer = serde_json::Deserializer::from_reader(reader);

    let result = ForEachVerse { callback, error: &mut error }.deserialize(&mut deserializer);

    if let Some(e) = error {
        return Err(e);
    }

    let count = result.context("Failed to decode merged JSON corpus")?;
    deserializer.end().context("Unexpected data after the merged JSON array")?;

    Ok(count)
}

/// Reads the whole merged corpus into memory.
pub fn read_merged_json(path: &Path) -> Result<Vec<Verse>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open merged JSON: {}", path.display()))?;

    let mut verses = Vec::new();
    for_each_verse(BufReader::new(file), |verse| {
        verses.push(verse);
        Ok(())
    })?;

    Ok(verses)
}

/// `.json` files directly in `dir`, sorted by file name.
pub fn list_json_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    Processed,
    Missing,
    Empty,
}

#[derive(Debug, Clone)]
pub struct SourceReport {
    pub folder: &'static str,
    pub kind: SourceKind,
    pub status: FolderStatus,
    pub files_processed: usize,
    pub files_failed: usize,
    pub verses_written: usize,
}

impl SourceReport {
    fn new(folder: &'static str, kind: SourceKind) -> Self {
        SourceReport {
            folder,
            kind,
            status: FolderStatus::Processed,
            files_processed: 0,
            files_failed: 0,
            verses_written: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    pub sources: Vec<SourceReport>,
}

impl AggregateReport {
    pub fn total_verses(&self) -> usize {
        self.sources.iter().map(|s| s.verses_written).sum()
    }

    pub fn total_files_failed(&self) -> usize {
        self.sources.iter().map(|s| s.files_failed).sum()
    }

    pub fn source(&self, folder: &str) -> Option<&SourceReport> {
        self.sources.iter().find(|s| s.folder == folder)
    }

    fn log_summary(&self) {
        for s in &self.sources {
            match s.status {
                FolderStatus::Processed => logger::info(&format!(
                    "{}: {} verses from {} files ({} failed)",
                    s.folder, s.verses_written, s.files_processed, s.files_failed
                )),
                FolderStatus::Missing => logger::info(&format!("{}: missing", s.folder)),
                FolderStatus::Empty => logger::info(&format!("{}: no JSON files", s.folder)),
            }
        }
        logger::info(&format!("Total verses: {}", self.total_verses()));
    }
}

/// Drives the source adapters over the DharmicData folder tree.
pub struct CorpusAggregator {
    input_dir: PathBuf,
}

impl CorpusAggregator {
    pub fn new(input_dir: PathBuf) -> Self {
        Self { input_dir }
    }

    /// Writes the merged corpus to `output_path`, replacing any existing file.
    pub fn write_merged_json(&self, output_path: &Path) -> Result<AggregateReport> {
        logger::info(&format!("Writing merged JSON corpus to: {}", output_path.display()));

        if let Some(parent) = output_path.parent() {
            ensure_directory_exists(parent)?;
        }

        let file = File::create(output_path)
            .with_context(|| format!("Failed to create merged JSON: {}", output_path.display()))?;

        self.write_to(BufWriter::new(file))
    }

    /// A failing source file is logged and skipped. Errors writing the output are returned.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<AggregateReport> {
        let mut out = VerseJsonWriter::new(writer)?;
        let mut report = AggregateReport::default();

        for (folder, kind) in SOURCE_FOLDERS {
            let source = self.aggregate_source(folder, kind, &mut out)?;
            report.sources.push(source);
        }

        out.finish()?;
        report.log_summary();

        Ok(report)
    }

    fn aggregate_source<W: Write>(
        &self,
        folder: &'static str,
        kind: SourceKind,
        out: &mut VerseJsonWriter<W>,
    ) -> Result<SourceReport> {
        let mut report = SourceReport::new(folder, kind);
        let dir = self.input_dir.join(folder);

        if !dir.is_dir() {
            logger::warn(&format!("Source folder not found, skipping: {}", dir.display()));
            report.status = FolderStatus::Missing;
            return Ok(report);
        }

        let files = list_json_files(&dir);
        if files.is_empty() {
            logger::info(&format!("No JSON files in {}, skipping", dir.display()));
            report.status = FolderStatus::Empty;
            return Ok(report);
        }

        logger::info(&format!("Processing {} ({} files)", folder, files.len()));

        for path in files {
            let source_file = path.strip_prefix(&self.input_dir)
                .unwrap_or(&path)
                .display()
                .to_string();

            match kind.parse_file(&path, &source_file) {
                Ok(verses) => {
                    for verse in &verses {
                        out.write_verse(verse)?;
                    }
                    report.files_processed += 1;
                    report.verses_written += verses.len();
                }
                Err(e) => {
                    logger::error(&format!("Error processing {}: {:#}", path.display(), e));
                    report.files_failed += 1;
                }
            }
        }

        Ok(report)
    }
}
