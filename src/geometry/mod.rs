//! Geometric primitives for table reconstruction.
//!
//! Page space has its origin at the top-left corner with y growing downwards,
//! so "top" is the smaller y coordinate. All types here are small `Copy`
//! values; nothing holds a reference back to the page it came from.

use serde::{Deserialize, Serialize};

/// Default epsilon for float comparisons of snapped coordinates.
pub const EPSILON: f32 = 0.01;

/// Compare two floats for equality within `epsilon`.
///
/// # Examples
///
/// ```
/// use table_oxide::geometry::approx_eq;
///
/// assert!(approx_eq(10.0, 10.005, 0.01));
/// assert!(!approx_eq(10.0, 10.5, 0.01));
/// ```
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in page space.
///
/// Serialized as `{top, left, width, height}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of top-left corner
    #[serde(rename = "left")]
    pub x: f32,
    /// Y coordinate of top-left corner
    #[serde(rename = "top")]
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from `(top, left, width, height)`, the order used
    /// by table fixtures and the serialized form.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Rect;
    ///
    /// let rect = Rect::from_top_left(40.0, 18.0, 208.0, 4.0);
    /// assert_eq!(rect.top(), 40.0);
    /// assert_eq!(rect.left(), 18.0);
    /// assert_eq!(rect.right(), 226.0);
    /// ```
    pub fn from_top_left(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, width, height)
    }

    /// Create a rectangle from two corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Rect;
    ///
    /// let rect = Rect::from_points(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.x, 10.0);
    /// assert_eq!(rect.y, 20.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Smallest rectangle containing every rectangle of the iterator.
    ///
    /// Returns `None` for an empty iterator.
    pub fn bounding_box<'a, I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects.into_iter().fold(None, |acc: Option<Rect>, r| match acc {
            Some(b) => Some(b.union(r)),
            None => Some(*r),
        })
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// let center = rect.center();
    /// assert_eq!(center.x, 50.0);
    /// assert_eq!(center.y, 25.0);
    /// ```
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// All four coordinates are finite and the size is non-negative.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Check if the interiors of two rectangles intersect.
    ///
    /// Rectangles that only share an edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let r2 = Rect::new(50.0, 50.0, 100.0, 100.0);
    /// let r3 = Rect::new(100.0, 0.0, 100.0, 100.0);
    ///
    /// assert!(r1.intersects(&r2));
    /// assert!(!r1.intersects(&r3));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Check if two rectangles touch or overlap, allowing a gap of up to
    /// `tolerance` on either axis. Shared edges and shared corners count.
    pub fn touches(&self, other: &Rect, tolerance: f32) -> bool {
        self.left() <= other.right() + tolerance
            && other.left() <= self.right() + tolerance
            && self.top() <= other.bottom() + tolerance
            && other.top() <= self.bottom() + tolerance
    }

    /// Check if this rectangle contains a point (edges inclusive).
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::{Rect, Point};
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// assert!(rect.contains_point(&Point::new(50.0, 50.0)));
    /// assert!(!rect.contains_point(&Point::new(150.0, 150.0)));
    /// ```
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Euclidean distance from the rectangle to a point (0 when inside).
    pub fn distance_to_point(&self, p: &Point) -> f32 {
        let dx = (self.left() - p.x).max(0.0).max(p.x - self.right());
        let dy = (self.top() - p.y).max(0.0).max(p.y - self.bottom());
        (dx * dx + dy * dy).sqrt()
    }

    /// Compute the union of this rectangle with another.
    ///
    /// Returns the smallest rectangle that contains both rectangles.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 50.0, 50.0);
    /// let r2 = Rect::new(25.0, 25.0, 50.0, 50.0);
    /// let union = r1.union(&r2);
    ///
    /// assert_eq!(union.x, 0.0);
    /// assert_eq!(union.y, 0.0);
    /// assert_eq!(union.right(), 75.0);
    /// assert_eq!(union.bottom(), 75.0);
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::from_points(x0, y0, x1, y1)
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn expand(&self, amount: f32) -> Rect {
        Rect::from_points(
            self.left() - amount,
            self.top() - amount,
            self.right() + amount,
            self.bottom() + amount,
        )
    }

    /// Compute the area of the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.area(), 5000.0);
    /// ```
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Length of the overlap of the two vertical extents (0 when disjoint).
    pub fn vertical_overlap(&self, other: &Rect) -> f32 {
        (self.bottom().min(other.bottom()) - self.top().max(other.top())).max(0.0)
    }

    /// Length of the overlap of the two horizontal extents (0 when disjoint).
    pub fn horizontal_overlap(&self, other: &Rect) -> f32 {
        (self.right().min(other.right()) - self.left().max(other.left())).max(0.0)
    }

    /// Vertical overlap as a fraction of the shorter of the two heights.
    ///
    /// Zero-height rectangles count as fully overlapping when their extents
    /// meet at all.
    pub fn vertical_overlap_ratio(&self, other: &Rect) -> f32 {
        let shorter = self.height.min(other.height);
        let overlap = self.vertical_overlap(other);
        if shorter <= 0.0 {
            let meets = self.top() <= other.bottom() && other.top() <= self.bottom();
            return if meets { 1.0 } else { 0.0 };
        }
        overlap / shorter
    }

    /// Intersection area over union area.
    pub fn overlap_ratio(&self, other: &Rect) -> f32 {
        let inter = self.horizontal_overlap(other) * self.vertical_overlap(other);
        let union = self.area() + other.area() - inter;
        if union <= 0.0 {
            return 0.0;
        }
        inter / union
    }
}

/// Compute the Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use table_oxide::geometry::{Point, euclidean_distance};
///
/// let p1 = Point::new(0.0, 0.0);
/// let p2 = Point::new(3.0, 4.0);
///
/// assert_eq!(euclidean_distance(&p1, &p2), 5.0);
/// ```
pub fn euclidean_distance(p1: &Point, p2: &Point) -> f32 {
    ((p2.x - p1.x).powi(2) + (p2.y - p1.y).powi(2)).sqrt()
}
