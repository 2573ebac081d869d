//! Heading outline inference.
//!
//! The pipeline runs in strictly forward stages over one document's
//! fragments:
//!
//! 1. [`body_style`]: the most common style is taken as body text
//! 2. [`is_heading`]: fragments standing out by size or weight and shaped
//!    like headings are kept
//! 3. [`assign_levels`]: distinct heading sizes are ranked, largest = H1
//! 4. [`build_outline`]: the leveled list is nested into a forest
//!
//! The title is taken independently from the first page by
//! [`extract_title`]. Every stage is a pure function; [`OutlineExtractor`]
//! only carries the options between them.

mod baseline;
mod builder;
mod classify;
mod levels;
mod options;
mod title;

pub use baseline::body_style;
pub use builder::build_outline;
pub use classify::{is_all_caps, is_heading, is_title_case, match_heading, HeadingPattern};
pub use levels::assign_levels;
pub use options::OutlineOptions;
pub use title::extract_title;

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{OutlineNode, OutlineResult, TextFragment};
use crate::source::{FragmentSource, PdfSource, SourceOptions};

/// Runs the outline pipeline with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: OutlineOptions,
}

impl OutlineExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// Extract title and outline from a fragment source.
    ///
    /// Source errors are returned as-is; see [`OutlineExtractor::extract_or_fallback`]
    /// for the non-failing variant.
    pub fn extract<S: FragmentSource + ?Sized>(&self, source: &S) -> Result<OutlineResult> {
        let fragments = source.fragments()?;

        let first_page: Vec<TextFragment> =
            fragments.iter().filter(|f| f.page == 1).cloned().collect();
        let title = extract_title(&first_page, self.options.title_tolerance);

        Ok(OutlineResult::new(title, self.outline_from_fragments(&fragments)))
    }

    /// Run the heading stages over already extracted fragments.
    pub fn outline_from_fragments(&self, fragments: &[TextFragment]) -> Vec<OutlineNode> {
        if fragments.is_empty() {
            return Vec::new();
        }

        let body = body_style(fragments);
        let headings: Vec<TextFragment> = fragments
            .iter()
            .filter(|f| is_heading(f, body.font_size, &self.options))
            .cloned()
            .collect();
        log::debug!(
            "{} of {} fragments classified as headings (body {}pt)",
            headings.len(),
            fragments.len(),
            body.font_size
        );

        let leveled = assign_levels(&headings, self.options.fallback_level);
        build_outline(&leveled)
    }

    /// Extract from a source, turning any failure into the fallback result.
    pub fn extract_or_fallback<S: FragmentSource + ?Sized>(&self, source: &S) -> OutlineResult {
        match self.extract(source) {
            Ok(result) => result,
            Err(e) => {
                log::error!("Outline extraction failed: {}", e);
                OutlineResult::fallback()
            }
        }
    }

    /// Open a PDF file and extract its outline.
    pub fn extract_file<P: AsRef<Path>>(
        &self,
        path: P,
        source_options: SourceOptions,
    ) -> Result<OutlineResult> {
        let source = PdfSource::open_with_options(path, source_options)?;
        self.extract(&source)
    }

    /// Process a PDF file, never failing.
    ///
    /// Errors and panics raised while reading the document are logged and
    /// replaced by [`OutlineResult::fallback`]. The document is closed before
    /// this returns on every path.
    pub fn process_file<P: AsRef<Path>>(
        &self,
        path: P,
        source_options: SourceOptions,
    ) -> OutlineResult {
        let path = path.as_ref();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.extract_file(path, source_options)
        }))
        .unwrap_or_else(|payload| Err(Error::Corrupted(panic_message(payload.as_ref()))));

        match outcome {
            Ok(result) => {
                log::info!(
                    "{}: {} headings, title {:?}",
                    path.display(),
                    result.heading_count(),
                    result.title
                );
                result
            }
            Err(e) => {
                log::error!("Error processing {}: {}", path.display(), e);
                OutlineResult::fallback()
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("parser panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("parser panicked: {}", s)
    } else {
        "parser panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ERROR_TITLE, UNTITLED};
    use crate::source::MemorySource;

    struct FailingSource;

    impl FragmentSource for FailingSource {
        fn page_count(&self) -> u32 {
            2
        }

        fn page_fragments(&self, page: u32) -> Result<Vec<TextFragment>> {
            Err(Error::TextExtract(format!("page {} unreadable", page)))
        }
    }

    #[test]
    fn test_no_pages_is_untitled_and_empty() {
        let result = OutlineExtractor::new()
            .extract(&MemorySource::default())
            .unwrap();
        assert_eq!(result.title, UNTITLED);
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_blank_pages_keep_placeholder_title() {
        let result = OutlineExtractor::new()
            .extract(&MemorySource::with_pages(3))
            .unwrap();
        assert_eq!(result.title, UNTITLED);
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_failure_becomes_fallback() {
        let extractor = OutlineExtractor::new();
        assert!(extractor.extract(&FailingSource).is_err());

        let result = extractor.extract_or_fallback(&FailingSource);
        assert_eq!(result.title, ERROR_TITLE);
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_process_missing_file_falls_back() {
        let result =
            OutlineExtractor::new().process_file("/no/such/file.pdf", SourceOptions::default());
        assert!(result.is_fallback());
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "parser panicked: boom");
    }
}
