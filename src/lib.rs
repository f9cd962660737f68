// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Table Oxide
//!
//! Table reconstruction from positioned text and ruling lines.
//!
//! Given a page already decoded into glyph boxes ([`TextElement`]) and line
//! segments ([`Ruling`]), Table Oxide rebuilds the tables on it as rows of
//! cells with text, bounding boxes and spans.
//!
//! ## Extraction paths
//!
//! - **Ruled**: normalize rulings, index their crossings, find the minimal
//!   closed rectangles, merge touching cells into regions and assign text to
//!   cells, resolving row and column spans.
//! - **Unruled**: merge glyphs into words and lines, then place column and
//!   row separators at the valleys of smoothed projection profiles.
//! - **Auto**: ruled when the page has closed cells, unruled otherwise.
//!
//! ## Architecture
//! - **Stateless stages**: every stage is a pure function of its inputs and
//!   an [`ExtractionConfig`]; one extractor serves many threads.
//! - **Collaborator seam**: page decoding sits behind
//!   [`document::PageSource`]; documents fan out across pages with `rayon`.
//! - **Writers**: CSV, TSV and JSON in a caller-owned
//!   [`converters::WriterRegistry`].
//!
//! ## Quick Start
//!
//! ```
//! use table_oxide::{Page, Rect, Ruling, TableExtractor, TextElement};
//!
//! // Two columns, one row, fully ruled
//! let page = Page::new(1, Rect::new(0.0, 0.0, 200.0, 100.0))
//!     .with_rulings(vec![
//!         Ruling::horizontal(10.0, 10.0, 110.0),
//!         Ruling::horizontal(30.0, 10.0, 110.0),
//!         Ruling::vertical(10.0, 10.0, 30.0),
//!         Ruling::vertical(60.0, 10.0, 30.0),
//!         Ruling::vertical(110.0, 10.0, 30.0),
//!     ])
//!     .with_text(vec![
//!         TextElement::from_top_left(14.0, 20.0, 6.0, 10.0, "A", 10.0),
//!         TextElement::from_top_left(14.0, 70.0, 6.0, 10.0, "B", 10.0),
//!     ]);
//!
//! let tables = TableExtractor::default().extract(&page);
//! assert_eq!(tables.len(), 1);
//! assert_eq!(tables[0].text_grid(), vec![vec!["A", "B"]]);
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Value types
pub mod elements;
pub mod geometry;

// Geometric stages
pub mod layout;

// Extraction algorithms and strategy selection
pub mod pipeline;

// Multi-page fan-out over a page source
pub mod document;

// Output writers
pub mod converters;

// Re-exports
pub use config::ExtractionConfig;
pub use converters::{OutputFormat, TableWriter, WriterRegistry};
pub use document::{extract_document, extract_pages, InMemorySource, PageSource};
pub use elements::{ExtractionMethod, Page, Ruling, Table, TableCell, TextElement};
pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use pipeline::{ExtractionAlgorithm, ExtractionStrategy, TableExtractor};
