//! Batch processing of a directory of PDFs.
//!
//! Every `*.pdf` in the input directory (case-insensitive, non-recursive) is
//! processed on its own and written to `<stem>.json` in the output directory.
//! A document that cannot be read still produces a file holding the fallback
//! result, so a run yields one output per input. Inputs whose names differ
//! only in extension case share an output; they are logged and written in
//! input order, the last one winning.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::model::OutlineResult;
use crate::outline::{OutlineExtractor, OutlineOptions};
use crate::render::{to_json_writer, JsonFormat};
use crate::source::SourceOptions;

/// Options for a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Heading heuristics
    pub outline: OutlineOptions,
    /// How documents are read
    pub source: SourceOptions,
    /// JSON layout of the output files
    pub format: JsonFormat,
    /// Process documents on the rayon pool instead of one at a time
    pub parallel: bool,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading heuristics.
    pub fn with_outline(mut self, outline: OutlineOptions) -> Self {
        self.outline = outline;
        self
    }

    /// Set the source options.
    pub fn with_source(mut self, source: SourceOptions) -> Self {
        self.source = source;
        self
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// How a single document came out of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    /// An outline was extracted
    Processed,
    /// The document could not be read; the fallback result was written
    Fallback,
    /// The output file could not be written
    WriteFailed,
}

/// Outcome for one input document.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    /// Input PDF
    pub input: PathBuf,
    /// Output JSON path
    pub output: PathBuf,
    /// Outcome
    pub status: DocumentStatus,
    /// Number of headings in the written outline
    pub headings: usize,
    /// Write error, when `status` is `WriteFailed`
    pub error: Option<String>,
}

/// Outcome of a batch run, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    /// Documents with an extracted outline.
    pub fn processed(&self) -> usize {
        self.count(DocumentStatus::Processed)
    }

    /// Documents that fell back to the placeholder result.
    pub fn fallbacks(&self) -> usize {
        self.count(DocumentStatus::Fallback)
    }

    /// Documents whose output could not be written.
    pub fn write_failures(&self) -> usize {
        self.count(DocumentStatus::WriteFailed)
    }

    fn count(&self, status: DocumentStatus) -> usize {
        self.documents.iter().filter(|d| d.status == status).count()
    }
}

/// List the PDFs directly inside `dir`, sorted by file name.
pub fn find_documents<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::InputNotFound(dir.to_path_buf()));
    }

    let mut documents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

/// Output path for an input document: `<output_dir>/<stem>.json`.
///
/// Only the final `.pdf` is replaced; earlier dots in the name are kept.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Output paths claimed by more than one input, in first-claimed order.
///
/// Inputs differing only in extension case (`a.pdf`, `a.PDF`) collide.
pub fn duplicate_outputs(documents: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for input in documents {
        let output = output_path_for(input, output_dir);
        if !seen.insert(output.clone()) && !duplicates.contains(&output) {
            duplicates.push(output);
        }
    }
    duplicates
}

/// Process every PDF in `input_dir`, writing one JSON file per document.
///
/// Fails only when the input directory is missing or holds no PDFs, or the
/// output directory cannot be created. Per-document problems are recorded in
/// the report.
pub fn process_directory<P, Q>(input_dir: P, output_dir: Q, options: &BatchOptions) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input_dir = input_dir.as_ref();
    let documents = find_documents(input_dir)?;
    if documents.is_empty() {
        return Err(Error::NoDocuments(input_dir.to_path_buf()));
    }
    process_documents(&documents, output_dir, options)
}

/// Process an explicit list of PDFs into `output_dir`.
pub fn process_documents<Q: AsRef<Path>>(
    documents: &[PathBuf],
    output_dir: Q,
    options: &BatchOptions,
) -> Result<BatchReport> {
    process_documents_with(documents, output_dir, options, |_| {})
}

/// Like [`process_documents`], calling `on_done` as each document finishes.
///
/// In parallel mode `on_done` runs on the worker threads, in completion order.
pub fn process_documents_with<Q, F>(
    documents: &[PathBuf],
    output_dir: Q,
    options: &BatchOptions,
    on_done: F,
) -> Result<BatchReport>
where
    Q: AsRef<Path>,
    F: Fn(&DocumentReport) + Sync,
{
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let duplicates = duplicate_outputs(documents, output_dir);
    for output in &duplicates {
        log::warn!(
            "Several inputs map to {}; only the last one written is kept",
            output.display()
        );
    }
    // Colliding outputs are written in input order, never concurrently.
    let parallel = options.parallel && duplicates.is_empty();

    let extractor = OutlineExtractor::with_options(options.outline.clone());
    let run = |input: &PathBuf| {
        let report = process_one(&extractor, input, output_dir, options);
        on_done(&report);
        report
    };

    let reports: Vec<DocumentReport> = if parallel {
        documents.par_iter().map(run).collect()
    } else {
        documents.iter().map(run).collect()
    };

    Ok(BatchReport { documents: reports })
}

/// Process one document into its output file.
pub fn process_one(
    extractor: &OutlineExtractor,
    input: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> DocumentReport {
    let output = output_path_for(input, output_dir);
    let result = extractor.process_file(input, options.source.clone());

    let status = if result.is_fallback() {
        DocumentStatus::Fallback
    } else {
        DocumentStatus::Processed
    };
    let headings = result.heading_count();

    match write_result(&output, &result, options.format) {
        Ok(()) => DocumentReport {
            input: input.to_path_buf(),
            output,
            status,
            headings,
            error: None,
        },
        Err(e) => {
            log::warn!("Failed to write {}: {}", output.display(), e);
            DocumentReport {
                input: input.to_path_buf(),
                output,
                status: DocumentStatus::WriteFailed,
                headings,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Write a result as JSON to `path`.
pub fn write_result(path: &Path, result: &OutlineResult, format: JsonFormat) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    to_json_writer(&mut writer, result, format)?;
    writer.flush()?;
    Ok(())
}
