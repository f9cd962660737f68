//! Ruling lines: straight segments that may be table borders.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Orientation of a ruling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Constant y
    Horizontal,
    /// Constant x
    Vertical,
    /// Neither; never used for grid inference
    Oblique,
}

/// A directed line segment from `(x1, y1)` to `(x2, y2)`.
///
/// Raw rulings come straight from the page decoder. After normalization
/// (see [`crate::layout::rulings`]) every ruling is exactly horizontal or
/// vertical and runs from its smaller to its larger coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ruling {
    /// Start x
    pub x1: f32,
    /// Start y
    pub y1: f32,
    /// End x
    pub x2: f32,
    /// End y
    pub y2: f32,
}

impl Ruling {
    /// Create a ruling between two points.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a ruling from a degenerate rectangle `(top, left, width, height)`.
    ///
    /// Exactly one of `width`/`height` is expected to be zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::elements::Ruling;
    ///
    /// let h = Ruling::from_top_left(40.0, 18.0, 208.0, 0.0);
    /// assert!(h.is_horizontal());
    /// assert_eq!(h.position(), 40.0);
    /// assert_eq!(h.end(), 226.0);
    /// ```
    pub fn from_top_left(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    /// Horizontal ruling at `y` from `x_start` to `x_end`.
    pub fn horizontal(y: f32, x_start: f32, x_end: f32) -> Self {
        Self::new(x_start, y, x_end, y)
    }

    /// Vertical ruling at `x` from `y_start` to `y_end`.
    pub fn vertical(x: f32, y_start: f32, y_end: f32) -> Self {
        Self::new(x, y_start, x, y_end)
    }

    /// All four coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }

    /// Euclidean length.
    pub fn length(&self) -> f32 {
        ((self.x2 - self.x1).powi(2) + (self.y2 - self.y1).powi(2)).sqrt()
    }

    /// Direction angle in degrees, in `[0, 360)`, measured from the +x axis.
    pub fn angle_degrees(&self) -> f32 {
        let angle = (self.y2 - self.y1).atan2(self.x2 - self.x1).to_degrees();
        if angle < 0.0 {
            angle + 360.0
        } else {
            angle
        }
    }

    /// Classify by angle, accepting up to `tolerance_degrees` of slant.
    pub fn classify(&self, tolerance_degrees: f32) -> Orientation {
        let angle = self.angle_degrees();
        let near = |target: f32| (angle - target).abs() <= tolerance_degrees;
        if near(0.0) || near(180.0) || near(360.0) {
            Orientation::Horizontal
        } else if near(90.0) || near(270.0) {
            Orientation::Vertical
        } else {
            Orientation::Oblique
        }
    }

    /// Exact orientation of the segment as stored.
    pub fn orientation(&self) -> Orientation {
        if self.y1 == self.y2 && self.x1 != self.x2 {
            Orientation::Horizontal
        } else if self.x1 == self.x2 && self.y1 != self.y2 {
            Orientation::Vertical
        } else {
            Orientation::Oblique
        }
    }

    /// Check if the ruling is exactly horizontal.
    pub fn is_horizontal(&self) -> bool {
        self.orientation() == Orientation::Horizontal
    }

    /// Check if the ruling is exactly vertical.
    pub fn is_vertical(&self) -> bool {
        self.orientation() == Orientation::Vertical
    }

    /// The constant coordinate: y for horizontal rulings, x otherwise.
    pub fn position(&self) -> f32 {
        if self.is_horizontal() {
            self.y1
        } else {
            self.x1
        }
    }

    /// Smaller coordinate along the ruling's axis.
    pub fn start(&self) -> f32 {
        if self.is_horizontal() {
            self.x1.min(self.x2)
        } else {
            self.y1.min(self.y2)
        }
    }

    /// Larger coordinate along the ruling's axis.
    pub fn end(&self) -> f32 {
        if self.is_horizontal() {
            self.x1.max(self.x2)
        } else {
            self.y1.max(self.y2)
        }
    }

    /// Get the top y-coordinate.
    pub fn top(&self) -> f32 {
        self.y1.min(self.y2)
    }

    /// Get the bottom y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y1.max(self.y2)
    }

    /// Get the left x-coordinate.
    pub fn left(&self) -> f32 {
        self.x1.min(self.x2)
    }

    /// Get the right x-coordinate.
    pub fn right(&self) -> f32 {
        self.x1.max(self.x2)
    }

    /// Bounding box (zero width or height for axis-aligned rulings).
    pub fn bbox(&self) -> Rect {
        Rect::from_points(self.left(), self.top(), self.right(), self.bottom())
    }

    /// Force the segment onto `orientation`, averaging the constant
    /// coordinate and ordering the endpoints ascending.
    pub(crate) fn straightened(&self, orientation: Orientation) -> Ruling {
        match orientation {
            Orientation::Horizontal => {
                let y = (self.y1 + self.y2) / 2.0;
                Ruling::horizontal(y, self.left(), self.right())
            },
            Orientation::Vertical => {
                let x = (self.x1 + self.x2) / 2.0;
                Ruling::vertical(x, self.top(), self.bottom())
            },
            Orientation::Oblique => *self,
        }
    }

    /// Same position, new extent along the axis.
    pub(crate) fn with_extent(&self, start: f32, end: f32) -> Ruling {
        if self.is_horizontal() {
            Ruling::horizontal(self.y1, start, end)
        } else {
            Ruling::vertical(self.x1, start, end)
        }
    }

    /// Lengthen both ends by `amount` along the ruling's axis.
    pub fn expand(&self, amount: f32) -> Ruling {
        self.with_extent(self.start() - amount, self.end() + amount)
    }

    /// Check whether two collinear rulings overlap or leave a gap of at
    /// most `gap` between them.
    pub fn nearly_abuts(&self, other: &Ruling, gap: f32) -> bool {
        self.start() <= other.end() + gap && other.start() <= self.end() + gap
    }

    /// Crossing point of this horizontal ruling with a vertical one.
    ///
    /// Both segments are lengthened by `tolerance` first so that rulings
    /// stopping just short of each other still meet. Returns `None` when
    /// the orientations are not horizontal/vertical or the segments miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::elements::Ruling;
    ///
    /// let h = Ruling::horizontal(10.0, 0.0, 100.0);
    /// let v = Ruling::vertical(101.5, 0.0, 50.0);
    /// assert!(h.intersection_point(&v, 2.0).is_some());
    /// assert!(h.intersection_point(&v, 1.0).is_none());
    /// ```
    pub fn intersection_point(&self, vertical: &Ruling, tolerance: f32) -> Option<Point> {
        if !self.is_horizontal() || !vertical.is_vertical() {
            return None;
        }
        let x = vertical.position();
        let y = self.position();
        let within_h = x >= self.start() - tolerance && x <= self.end() + tolerance;
        let within_v = y >= vertical.start() - tolerance && y <= vertical.end() + tolerance;
        if within_h && within_v {
            Some(Point::new(x, y))
        } else {
            None
        }
    }

    /// Clip an axis-aligned ruling to `area`.
    ///
    /// Returns `None` when the ruling lies wholly outside the area.
    /// Oblique rulings are returned unchanged if their bounding box meets the
    /// area.
    pub fn clip(&self, area: &Rect) -> Option<Ruling> {
        match self.orientation() {
            Orientation::Horizontal => {
                let y = self.position();
                if y < area.top() || y > area.bottom() {
                    return None;
                }
                let start = self.start().max(area.left());
                let end = self.end().min(area.right());
                (start <= end).then(|| Ruling::horizontal(y, start, end))
            },
            Orientation::Vertical => {
                let x = self.position();
                if x < area.left() || x > area.right() {
                    return None;
                }
                let start = self.start().max(area.top());
                let end = self.end().min(area.bottom());
                (start <= end).then(|| Ruling::vertical(x, start, end))
            },
            Orientation::Oblique => {
                let b = self.bbox();
                b.touches(area, 0.0).then_some(*self)
            },
        }
    }
}
