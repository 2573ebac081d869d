//! Text fragment sources.
//!
//! The heading pipeline never touches a document container directly; it reads
//! styled fragments page by page through [`FragmentSource`]. [`PdfSource`]
//! walks PDF content streams with lopdf, [`MemorySource`] serves fragments
//! that were produced elsewhere.

mod content;
mod options;
mod pdf;

pub use options::{ErrorMode, SourceOptions};
pub use pdf::PdfSource;

use crate::error::{Error, Result};
use crate::model::TextFragment;

/// A document seen as ordered, styled text fragments.
pub trait FragmentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Fragments of one page (1-based), in layout order.
    fn page_fragments(&self, page: u32) -> Result<Vec<TextFragment>>;

    /// All fragments of the document, page by page.
    fn fragments(&self) -> Result<Vec<TextFragment>> {
        let mut all = Vec::new();
        for page in 1..=self.page_count() {
            all.extend(self.page_fragments(page)?);
        }
        Ok(all)
    }
}

/// Fragments held in memory, grouped by their `page` field.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Vec<TextFragment>>,
}

impl MemorySource {
    /// Create an empty source with `page_count` blank pages.
    pub fn with_pages(page_count: u32) -> Self {
        Self {
            pages: vec![Vec::new(); page_count as usize],
        }
    }

    /// Build a source from fragments; the page count is the highest page seen.
    ///
    /// Fragments with page 0 are ignored.
    pub fn from_fragments(fragments: impl IntoIterator<Item = TextFragment>) -> Self {
        let mut source = Self::default();
        for fragment in fragments {
            source.push(fragment);
        }
        source
    }

    /// Append a fragment to its page, growing the page count as needed.
    pub fn push(&mut self, fragment: TextFragment) {
        if fragment.page == 0 || fragment.text.is_empty() {
            return;
        }
        let index = fragment.page as usize - 1;
        if self.pages.len() <= index {
            self.pages.resize_with(index + 1, Vec::new);
        }
        self.pages[index].push(fragment);
    }
}

impl FragmentSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_fragments(&self, page: u32) -> Result<Vec<TextFragment>> {
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }
}
