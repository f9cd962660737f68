//! Extracted table model.
//!
//! A [`Table`] is the only artifact handed to callers. Rows run top to
//! bottom, cells within a row left to right, and every grid position holds a
//! cell: positions without text carry an empty string, and positions covered
//! by a spanning cell anchored elsewhere carry a zero-area placeholder.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Which extraction path produced a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Cells bounded by ruling lines
    Ruled,
    /// Columns and rows inferred from text density
    Unruled,
}

impl ExtractionMethod {
    /// Stable lowercase name (`"ruled"` / `"unruled"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Ruled => "ruled",
            ExtractionMethod::Unruled => "unruled",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_one(n: &usize) -> bool {
    *n == 1
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A cell in a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// Bounding box of the cell
    #[serde(rename = "boundingRectangle")]
    pub bbox: Rect,
    /// Cell text content (empty when nothing was assigned)
    pub text: String,
    /// Number of grid rows this cell spans
    #[serde(default = "one", skip_serializing_if = "is_one")]
    pub row_span: usize,
    /// Number of grid columns this cell spans
    #[serde(default = "one", skip_serializing_if = "is_one")]
    pub col_span: usize,
    /// Position covered by a spanning cell anchored elsewhere
    #[serde(default, skip_serializing_if = "is_false")]
    pub placeholder: bool,
}

fn one() -> usize {
    1
}

impl TableCell {
    /// Create a cell with text.
    pub fn new(bbox: Rect, text: impl Into<String>) -> Self {
        Self {
            bbox,
            text: text.into(),
            row_span: 1,
            col_span: 1,
            placeholder: false,
        }
    }

    /// Zero-area, empty cell marking a grid position covered by a span.
    pub fn placeholder(at: Point) -> Self {
        Self {
            bbox: Rect::new(at.x, at.y, 0.0, 0.0),
            text: String::new(),
            row_span: 1,
            col_span: 1,
            placeholder: true,
        }
    }

    /// Set row and column span.
    pub fn with_span(mut self, row_span: usize, col_span: usize) -> Self {
        self.row_span = row_span.max(1);
        self.col_span = col_span.max(1);
        self
    }

    /// Check if the cell has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// An extracted table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// 1-based page number the table was found on
    pub page_number: u32,
    /// Extraction path that produced the table
    pub extraction_method: ExtractionMethod,
    /// Bounding box of the entire table
    #[serde(rename = "boundingRectangle")]
    pub bbox: Rect,
    /// Rows, top to bottom; each row left to right
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    /// Create a table without rows.
    pub fn new(page_number: u32, extraction_method: ExtractionMethod, bbox: Rect) -> Self {
        Self {
            page_number,
            extraction_method,
            bbox,
            rows: Vec::new(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<TableCell>) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (longest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell at the specified row and column.
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterate over real (non-placeholder) cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.rows.iter().flatten().filter(|c| !c.placeholder)
    }

    /// Cell texts as a rectangular grid of strings.
    pub fn text_grid(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.text.clone()).collect())
            .collect()
    }
}
