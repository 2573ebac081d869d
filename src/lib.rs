//! # pdfoutline
//!
//! Heuristic heading outline extraction for PDF documents.
//!
//! PDFs rarely carry a usable structure tree, so the outline is inferred
//! from typography: the dominant font size is taken as body text, fragments
//! that stand out by size or weight and look like headings are kept, and
//! distinct heading sizes are ranked into levels and nested.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline_file, render, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let result = extract_outline_file("document.pdf")?;
//!     println!("{}", render::to_json(&result, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Batch
//!
//! ```no_run
//! use pdfoutline::{process_directory, BatchOptions};
//!
//! let report = process_directory("input", "output", &BatchOptions::new())?;
//! println!("{} processed, {} fell back", report.processed(), report.fallbacks());
//! # Ok::<(), pdfoutline::Error>(())
//! ```

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use batch::{
    duplicate_outputs, find_documents, process_directory, process_documents,
    process_documents_with, BatchOptions, BatchReport, DocumentReport, DocumentStatus,
};
pub use detect::{has_pdf_extension, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use model::{
    BodyStyle, HeadingLevel, LeveledHeading, OutlineNode, OutlineResult, TextFragment,
};
pub use outline::{OutlineExtractor, OutlineOptions};
pub use render::JsonFormat;
pub use source::{ErrorMode, FragmentSource, MemorySource, PdfSource, SourceOptions};

use std::path::Path;

/// Extract the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline_file;
///
/// let result = extract_outline_file("document.pdf").unwrap();
/// println!("{}: {} headings", result.title, result.heading_count());
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    OutlineExtractor::new().extract_file(path, SourceOptions::default())
}

/// Extract the title and outline of a PDF held in memory.
pub fn extract_outline_bytes(data: &[u8]) -> Result<OutlineResult> {
    let source = PdfSource::from_bytes(data)?;
    OutlineExtractor::new().extract(&source)
}

/// Extract the title and outline of a PDF file, never failing.
///
/// Unreadable documents yield [`OutlineResult::fallback`].
pub fn process_file<P: AsRef<Path>>(path: P) -> OutlineResult {
    OutlineExtractor::new().process_file(path, SourceOptions::default())
}
