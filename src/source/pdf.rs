//! lopdf-backed fragment source.

use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use super::content::{merge_runs, ContentWalker};
use super::options::{ErrorMode, SourceOptions};
use super::FragmentSource;
use crate::detect::{sniff_bytes, sniff_path};
use crate::error::{Error, Result};
use crate::model::TextFragment;

/// Letter height, used when a page has no readable MediaBox.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Parent-chain depth searched for inherited page attributes.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// A PDF document opened for fragment extraction.
///
/// The parsed document is owned by this value and released when it drops.
pub struct PdfSource {
    doc: LopdfDocument,
    options: SourceOptions,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, SourceOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: SourceOptions) -> Result<Self> {
        let path = path.as_ref();
        let header = sniff_path(path)?;
        log::debug!("Opening {} ({})", path.display(), header);

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, SourceOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: SourceOptions) -> Result<Self> {
        sniff_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc, options)
    }

    fn from_document(doc: LopdfDocument, options: SourceOptions) -> Result<Self> {
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may not decode");
        }
        Ok(Self { doc, options })
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, page_num: u32) -> Result<ObjectId> {
        let pages = self.doc.get_pages();
        pages
            .get(&page_num)
            .copied()
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))
    }

    fn extract_page(&self, page_num: u32) -> Result<Vec<TextFragment>> {
        let page_id = self.page_id(page_num)?;
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content = self.page_content(page_id)?;

        let runs = ContentWalker::new(&self.doc, fonts).runs(&content)?;
        let height = self.page_height(page_id);

        let fragments: Vec<TextFragment> = merge_runs(runs)
            .into_iter()
            .map(|run| {
                TextFragment::new(run.text, run.font_size, run.font_name, page_num)
                    .at(run.x, height - run.y)
            })
            .filter(|fragment| !fragment.text.is_empty())
            .collect();

        log::debug!("Page {}: {} fragments", page_num, fragments.len());
        Ok(fragments)
    }

    /// Concatenate the page's content streams.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without Contents is blank.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => Ok(stream_bytes(s)),
                Ok(Object::Array(arr)) => Ok(self.concat_streams(arr)),
                _ => Err(invalid_contents()),
            },
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            Object::Stream(s) => Ok(stream_bytes(s)),
            _ => Err(invalid_contents()),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in refs {
            if let Ok(r) = obj.as_reference() {
                if let Ok(Object::Stream(s)) = self.doc.get_object(r) {
                    content.extend_from_slice(&stream_bytes(s));
                    content.push(b' ');
                }
            }
        }
        content
    }

    /// Page height from the MediaBox, following Parent for inherited boxes.
    fn page_height(&self, page_id: ObjectId) -> f32 {
        let mut node = self.doc.get_dictionary(page_id).ok();

        for _ in 0..MAX_INHERITANCE_DEPTH {
            let Some(dict) = node else { break };

            if let Ok(media_box) = dict.get(b"MediaBox") {
                let media_box = match media_box {
                    Object::Reference(r) => self.doc.get_object(*r).ok(),
                    other => Some(other),
                };
                if let Some(Ok(values)) = media_box.map(Object::as_array) {
                    if values.len() >= 4 {
                        let y0 = values[1].as_float().unwrap_or(0.0);
                        let y1 = values[3].as_float().unwrap_or(DEFAULT_PAGE_HEIGHT);
                        return (y1 - y0).abs();
                    }
                }
            }

            node = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|parent| self.doc.get_dictionary(parent))
                .ok();
        }

        DEFAULT_PAGE_HEIGHT
    }
}

fn invalid_contents() -> Error {
    Error::TextExtract("page Contents is not a stream or array".to_string())
}

/// Decoded stream data, or the raw bytes when no filter applies.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

impl FragmentSource for PdfSource {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn page_fragments(&self, page: u32) -> Result<Vec<TextFragment>> {
        match self.extract_page(page) {
            Ok(fragments) => Ok(fragments),
            Err(e @ Error::PageOutOfRange(..)) => Err(e),
            Err(e) => {
                if self.options.error_mode == ErrorMode::Strict {
                    return Err(e);
                }
                log::warn!("Skipping text on page {}: {}", page, e);
                Ok(Vec::new())
            }
        }
    }
}
