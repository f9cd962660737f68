//! Text atoms supplied by the page decoder and the runs and lines built from them.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// A single glyph or minimal text atom, as supplied by the page decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// Bounding box of the glyph
    pub bbox: Rect,
    /// Character content (usually one char)
    pub text: String,
    /// Font size hint in points (0 when unknown)
    pub font_size: f32,
}

impl TextElement {
    /// Create a text element.
    pub fn new(bbox: Rect, text: impl Into<String>, font_size: f32) -> Self {
        Self {
            bbox,
            text: text.into(),
            font_size,
        }
    }

    /// Create a text element from `(top, left, width, height)`.
    pub fn from_top_left(
        top: f32,
        left: f32,
        width: f32,
        height: f32,
        text: impl Into<String>,
        font_size: f32,
    ) -> Self {
        Self::new(Rect::from_top_left(top, left, width, height), text, font_size)
    }

    /// Check if the element carries only whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }

    /// Number of characters in the element (at least 1).
    pub fn char_count(&self) -> usize {
        self.text.chars().count().max(1)
    }

    /// Font size used for gap thresholds: the hint when it is usable,
    /// otherwise the glyph height.
    pub fn effective_font_size(&self) -> f32 {
        if self.font_size.is_finite() && self.font_size > 0.0 {
            self.font_size
        } else {
            self.bbox.height.max(0.0)
        }
    }
}

/// A word or phrase: text elements merged left to right.
///
/// The bounding box is the union of the members and `text` is their
/// concatenation, including any synthetic spaces inserted between glyphs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    /// Union of the member bounding boxes
    pub bbox: Rect,
    /// Concatenated text
    pub text: String,
    /// Member elements in reading order (synthetic spaces excluded)
    pub elements: Vec<TextElement>,
}

impl TextRun {
    /// Start a run from one element.
    pub fn from_element(element: TextElement) -> Self {
        Self {
            bbox: element.bbox,
            text: element.text.clone(),
            elements: vec![element],
        }
    }

    pub(crate) fn push(&mut self, element: TextElement) {
        self.bbox = self.bbox.union(&element.bbox);
        self.text.push_str(&element.text);
        self.elements.push(element);
    }

    pub(crate) fn push_space(&mut self) {
        self.text.push(' ');
    }

    /// Last member element.
    pub fn last_element(&self) -> Option<&TextElement> {
        self.elements.last()
    }

    /// Center of the bounding box.
    pub fn centroid(&self) -> Point {
        self.bbox.center()
    }

    /// Run width divided by its character count.
    pub fn average_char_width(&self) -> f32 {
        let chars: usize = self.elements.iter().map(TextElement::char_count).sum();
        self.bbox.width / chars.max(1) as f32
    }

    /// Check if the run carries only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The single character the whole run repeats, if any (whitespace ignored).
    pub fn repeated_char(&self) -> Option<char> {
        let mut chars = self.text.chars().filter(|c| !c.is_whitespace());
        let first = chars.next()?;
        chars.all(|c| c == first).then_some(first)
    }
}

/// Runs sharing a vertical band, ordered left to right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    /// Union of the run bounding boxes
    pub bbox: Rect,
    /// Runs in left-to-right order
    pub runs: Vec<TextRun>,
}

impl TextLine {
    pub(crate) fn from_run(run: TextRun) -> Self {
        Self {
            bbox: run.bbox,
            runs: vec![run],
        }
    }

    pub(crate) fn push(&mut self, run: TextRun) {
        self.bbox = self.bbox.union(&run.bbox);
        self.runs.push(run);
    }

    /// Run texts joined with single spaces.
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|r| r.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
