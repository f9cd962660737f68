//! Page input contract: positioned text plus raw line segments.

use serde::{Deserialize, Serialize};

use crate::elements::{Ruling, TextElement};
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// One decoded page (or a sub-area of one).
///
/// This is the whole input of an extraction. Rulings are kept raw; they are
/// classified, snapped, merged and cropped to `bounds` by the ruling
/// normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    /// Page (or area) bounding box
    pub bounds: Rect,
    /// Text atoms, in decoder order
    pub text: Vec<TextElement>,
    /// Raw line segments, in decoder order
    pub rulings: Vec<Ruling>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32, bounds: Rect) -> Self {
        Self {
            number,
            bounds,
            text: Vec::new(),
            rulings: Vec::new(),
        }
    }

    /// Set the text elements.
    pub fn with_text(mut self, text: Vec<TextElement>) -> Self {
        self.text = text;
        self
    }

    /// Set the raw rulings.
    pub fn with_rulings(mut self, rulings: Vec<Ruling>) -> Self {
        self.rulings = rulings;
        self
    }

    /// Check if the page has neither text nor rulings.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.rulings.is_empty()
    }

    /// Smallest rectangle containing all text, if any.
    pub fn text_bounds(&self) -> Option<Rect> {
        Rect::bounding_box(self.text.iter().map(|t| &t.bbox))
    }

    /// Text elements whose centroid lies inside the page bounds.
    ///
    /// Decoders occasionally report glyphs far off the page; those never
    /// take part in extraction. Pages with non-finite bounds keep all text.
    pub fn visible_text(&self) -> Vec<TextElement> {
        if !self.bounds.is_finite() {
            return self.text.clone();
        }
        let text = self.text_inside(&self.bounds);
        if text.len() < self.text.len() {
            log::debug!(
                "Page {}: ignoring {} text elements outside the page bounds",
                self.number,
                self.text.len() - text.len()
            );
        }
        text
    }

    fn text_inside(&self, area: &Rect) -> Vec<TextElement> {
        self.text
            .iter()
            .filter(|t| area.contains_point(&t.bbox.center()))
            .cloned()
            .collect()
    }

    /// Restrict the page to `area`.
    ///
    /// Text elements whose centroid lies inside the area are kept. Rulings
    /// are carried over untouched and clipped to the new bounds during
    /// normalization.
    pub fn area(&self, area: Rect) -> Result<Page> {
        if !area.is_finite() {
            return Err(Error::InvalidArea(format!("{:?}", area)));
        }
        Ok(Page {
            number: self.number,
            bounds: area,
            text: self.text_inside(&area),
            rulings: self.rulings.clone(),
        })
    }
}
