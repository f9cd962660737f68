//! Multi-page extraction over a page-decoding collaborator.
//!
//! Decoding a document into text elements and line segments is somebody
//! else's job: it sits behind [`PageSource`]. The handle is used through
//! `&mut self`, so pages are loaded one at a time; extraction then fans out
//! over the loaded pages with `rayon` and tables come back in page order.
//!
//! # Examples
//!
//! ```
//! use table_oxide::document::{extract_document, InMemorySource};
//! use table_oxide::elements::Page;
//! use table_oxide::geometry::Rect;
//! use table_oxide::pipeline::{ExtractionStrategy, TableExtractor};
//!
//! let mut source = InMemorySource::new(vec![
//!     Page::new(1, Rect::new(0.0, 0.0, 612.0, 792.0)),
//!     Page::new(2, Rect::new(0.0, 0.0, 612.0, 792.0)),
//! ]);
//! let extractor = TableExtractor::with_strategy(ExtractionStrategy::Unruled);
//! let tables = extract_document(&mut source, &extractor).unwrap();
//! assert_eq!(tables.len(), 2);
//! assert_eq!(tables[1].page_number, 2);
//! ```

use rayon::prelude::*;

use crate::elements::{Page, Table};
use crate::error::{Error, Result};
use crate::pipeline::TableExtractor;

/// The page-decoding collaborator.
///
/// Implementations wrap whatever reads the source document. Failures
/// (unreadable or encrypted input) are reported as [`Error::Decoder`] and
/// are passed to the caller unchanged.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Decode one page (1-based).
    fn load_page(&mut self, number: u32) -> Result<Page>;
}

/// A source over pages that are already decoded.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pages: Vec<Page>,
}

impl InMemorySource {
    /// Wrap decoded pages; page `n` is `pages[n - 1]`.
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Load pages from JSON (an array of pages).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl PageSource for InMemorySource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(&mut self, number: u32) -> Result<Page> {
        let index = (number as usize).checked_sub(1);
        index
            .and_then(|i| self.pages.get(i))
            .cloned()
            .ok_or(Error::PageOutOfRange {
                page: number,
                count: self.pages.len(),
            })
    }
}

/// Extract tables from selected pages.
///
/// Pages are loaded sequentially; the first load failure is returned as-is
/// and nothing is extracted. Extraction itself runs in parallel.
pub fn extract_pages<S>(
    source: &mut S,
    pages: &[u32],
    extractor: &TableExtractor,
) -> Result<Vec<Table>>
where
    S: PageSource + ?Sized,
{
    let count = source.page_count();
    let mut loaded = Vec::with_capacity(pages.len());
    for &number in pages {
        if number == 0 || number as usize > count {
            return Err(Error::PageOutOfRange { page: number, count });
        }
        loaded.push(source.load_page(number)?);
    }

    let tables: Vec<Vec<Table>> = loaded.par_iter().map(|page| extractor.extract(page)).collect();
    let tables: Vec<Table> = tables.into_iter().flatten().collect();
    log::debug!("Extracted {} tables from {} pages", tables.len(), loaded.len());
    Ok(tables)
}

/// Extract tables from every page of a document.
pub fn extract_document<S>(source: &mut S, extractor: &TableExtractor) -> Result<Vec<Table>>
where
    S: PageSource + ?Sized,
{
    let pages: Vec<u32> = (1..=source.page_count() as u32).collect();
    extract_pages(source, &pages, extractor)
}
