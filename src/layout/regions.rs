//! Region merging and reading order.
//!
//! Cells that touch (edge or corner, within tolerance) belong to the same
//! table. Connected components are found with a union-find over the cell
//! list and each component's bounding box becomes one table region.

use std::cmp::Ordering;

use crate::config::RegionConfig;
use crate::geometry::Rect;

/// Reading-order comparator: top-to-bottom, then left-to-right.
///
/// Coordinates are first bucketed into bands of width `tolerance`, so boxes
/// whose tops differ by less than a band compare by their left edge. The
/// comparison is lexicographic over
/// `(top band, left band, top, left, bottom, right)`, where the bands are
/// integers and the raw coordinates use [`f32::total_cmp`]. Each component
/// is totally ordered and a lexicographic product of total orders is total,
/// so the comparator is transitive for any input, overlapping boxes and NaN
/// included. A plain "same row if the tops are within tolerance" rule is not
/// transitive: a ~ b and b ~ c does not imply a ~ c.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingOrder {
    tolerance: f32,
}

impl Default for ReadingOrder {
    fn default() -> Self {
        Self::new(RegionConfig::default().reading_order_tolerance)
    }
}

impl ReadingOrder {
    /// Create a comparator with the given band width.
    ///
    /// Non-positive or non-finite widths fall back to 1.0.
    pub fn new(tolerance: f32) -> Self {
        let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
            tolerance
        } else {
            1.0
        };
        Self { tolerance }
    }

    fn band(&self, value: f32) -> i64 {
        (value / self.tolerance).floor() as i64
    }

    /// Compare two rectangles.
    pub fn compare(&self, a: &Rect, b: &Rect) -> Ordering {
        self.band(a.top())
            .cmp(&self.band(b.top()))
            .then_with(|| self.band(a.left()).cmp(&self.band(b.left())))
            .then_with(|| a.top().total_cmp(&b.top()))
            .then_with(|| a.left().total_cmp(&b.left()))
            .then_with(|| a.bottom().total_cmp(&b.bottom()))
            .then_with(|| a.right().total_cmp(&b.right()))
    }

    /// Sort rectangles in reading order.
    pub fn sort(&self, rects: &mut [Rect]) {
        rects.sort_by(|a, b| self.compare(a, b));
    }

    /// Sort arbitrary items in reading order by their bounding box.
    pub fn sort_by_key<T, F>(&self, items: &mut [T], bbox: F)
    where
        F: Fn(&T) -> Rect,
    {
        items.sort_by(|a, b| self.compare(&bbox(a), &bbox(b)));
    }

    /// Check the order axioms on one triple.
    ///
    /// Returns `false` if antisymmetry or transitivity fails. Used by the
    /// property tests and by debug assertions in [`merge_regions`].
    pub fn check_transitive(&self, a: &Rect, b: &Rect, c: &Rect) -> bool {
        let ab = self.compare(a, b);
        let bc = self.compare(b, c);
        let ac = self.compare(a, c);
        if ab != self.compare(b, a).reverse() {
            return false;
        }
        if ab != Ordering::Greater && bc != Ordering::Greater {
            return ac != Ordering::Greater;
        }
        if ab != Ordering::Less && bc != Ordering::Less {
            return ac != Ordering::Less;
        }
        true
    }
}

/// One table candidate: a connected group of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRegion {
    /// Union of the member cells
    pub bbox: Rect,
    /// Member cells in reading order
    pub cells: Vec<Rect>,
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Smaller index becomes the root so roots are deterministic
            let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[child] = root;
        }
    }
}

/// Group cells into connected regions, sorted in reading order.
///
/// Cells within a region are also in reading order.
pub fn group_cells(cells: &[Rect], config: &RegionConfig) -> Vec<CellRegion> {
    let order = ReadingOrder::new(config.reading_order_tolerance);
    let mut sorted = cells.to_vec();
    order.sort(&mut sorted);

    let mut sets = DisjointSet::new(sorted.len());
    for i in 0..sorted.len() {
        for j in (i + 1)..sorted.len() {
            if sorted[i].touches(&sorted[j], config.touch_tolerance) {
                sets.union(i, j);
            }
        }
    }

    // Roots are the smallest member index, so components come out in the
    // order of their first cell; the final sort settles ties between bboxes.
    let mut components: Vec<(usize, CellRegion)> = Vec::new();
    for (i, cell) in sorted.iter().enumerate() {
        let root = sets.find(i);
        match components.iter_mut().find(|(r, _)| *r == root) {
            Some((_, region)) => {
                region.bbox = region.bbox.union(cell);
                region.cells.push(*cell);
            },
            None => components.push((
                root,
                CellRegion {
                    bbox: *cell,
                    cells: vec![*cell],
                },
            )),
        }
    }

    let mut regions: Vec<CellRegion> = components.into_iter().map(|(_, r)| r).collect();
    order.sort_by_key(&mut regions, |r| r.bbox);

    debug_assert!(regions
        .windows(3)
        .all(|w| order.check_transitive(&w[0].bbox, &w[1].bbox, &w[2].bbox)));
    log::debug!("Merged {} cells into {} regions", cells.len(), regions.len());
    regions
}

/// Bounding rectangles of the connected cell groups, in reading order.
///
/// # Examples
///
/// ```
/// use table_oxide::config::RegionConfig;
/// use table_oxide::geometry::Rect;
/// use table_oxide::layout::merge_regions;
///
/// let cells = [
///     Rect::from_top_left(100.0, 0.0, 50.0, 10.0),
///     Rect::from_top_left(0.0, 0.0, 50.0, 10.0),
///     Rect::from_top_left(0.0, 50.0, 50.0, 10.0),
/// ];
/// let regions = merge_regions(&cells, &RegionConfig::default());
/// assert_eq!(regions, vec![
///     Rect::from_top_left(0.0, 0.0, 100.0, 10.0),
///     Rect::from_top_left(100.0, 0.0, 50.0, 10.0),
/// ]);
/// ```
pub fn merge_regions(cells: &[Rect], config: &RegionConfig) -> Vec<Rect> {
    group_cells(cells, config).into_iter().map(|r| r.bbox).collect()
}
