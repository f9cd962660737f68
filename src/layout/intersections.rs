//! Intersection index: where horizontal and vertical rulings meet.

use std::collections::BTreeMap;

use crate::config::GridConfig;
use crate::elements::Ruling;
use crate::geometry::Point;

/// A crossing of one horizontal and one vertical ruling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Crossing point (`x` of the vertical, `y` of the horizontal)
    pub point: Point,
    /// Horizontal ruling through the point
    pub horizontal: Ruling,
    /// Vertical ruling through the point
    pub vertical: Ruling,
}

/// Point key, ordered top-to-bottom then left-to-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct PointKey {
    pub(crate) y: i64,
    pub(crate) x: i64,
}

/// Canonical keys for the coordinates seen on one axis.
///
/// Sorted coordinates are chained into clusters while each value is within
/// `precision` of the previous one, so two coordinates closer than
/// `precision` always share a cluster. A cluster's key is its first value
/// quantized to `precision`; first values of distinct clusters are more than
/// `precision` apart, so keys are distinct and keep the coordinate order.
#[derive(Debug, Clone, Default)]
struct AxisKeys {
    /// `(lowest, highest, key)` per cluster, ascending
    clusters: Vec<(f32, f32, i64)>,
    precision: f32,
}

impl AxisKeys {
    fn new(values: impl Iterator<Item = f32>, precision: f32) -> Self {
        let mut values: Vec<f32> = values.filter(|v| v.is_finite()).collect();
        values.sort_by(f32::total_cmp);

        let mut clusters: Vec<(f32, f32, i64)> = Vec::new();
        for v in values {
            match clusters.last_mut() {
                Some((_, high, _)) if v - *high <= precision => *high = v,
                _ => clusters.push((v, v, (v / precision).round() as i64)),
            }
        }
        Self { clusters, precision }
    }

    /// Key of the cluster `value` belongs to, or lies within `precision` of.
    fn key(&self, value: f32) -> Option<i64> {
        let i = self.clusters.partition_point(|(_, high, _)| *high + self.precision < value);
        self.clusters
            .get(i)
            .filter(|(low, _, _)| value >= *low - self.precision)
            .map(|(_, _, key)| *key)
    }
}

/// Map from intersection point to the ruling pair crossing there.
///
/// Points closer than `point_precision` on both axes share a key and are the
/// same intersection; the first pair found for a key is kept. Iteration runs
/// in key order (top-to-bottom, then left-to-right).
#[derive(Debug, Clone, Default)]
pub struct IntersectionIndex {
    points: BTreeMap<PointKey, Intersection>,
    xs: AxisKeys,
    ys: AxisKeys,
    precision: f32,
}

impl IntersectionIndex {
    fn key(&self, point: &Point) -> Option<PointKey> {
        Some(PointKey {
            y: self.ys.key(point.y)?,
            x: self.xs.key(point.x)?,
        })
    }
}

impl IntersectionIndex {
    /// Test every `(horizontal, vertical)` pair for a crossing.
    ///
    /// Both rulings are lengthened by `intersection_tolerance` first, so a
    /// border stopping just short of its neighbour still closes the corner.
    pub fn build(horizontal: &[Ruling], vertical: &[Ruling], config: &GridConfig) -> Self {
        let mut crossings = Vec::new();
        for h in horizontal {
            for v in vertical {
                if let Some(point) = h.intersection_point(v, config.intersection_tolerance) {
                    crossings.push(Intersection {
                        point,
                        horizontal: *h,
                        vertical: *v,
                    });
                }
            }
        }

        let precision = config.point_precision;
        let mut index = Self {
            points: BTreeMap::new(),
            xs: AxisKeys::new(crossings.iter().map(|c| c.point.x), precision),
            ys: AxisKeys::new(crossings.iter().map(|c| c.point.y), precision),
            precision,
        };
        for crossing in crossings {
            if let Some(key) = index.key(&crossing.point) {
                index.points.entry(key).or_insert(crossing);
            }
        }
        log::debug!(
            "Found {} intersections between {} horizontal and {} vertical rulings",
            index.points.len(),
            horizontal.len(),
            vertical.len()
        );
        index
    }

    /// Number of distinct intersection points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if no rulings cross.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Look up the intersection at (or within precision of) `point`.
    pub fn get(&self, point: &Point) -> Option<&Intersection> {
        let found = self.points.get(&self.key(point)?)?;
        let near = (found.point.x - point.x).abs() <= self.precision
            && (found.point.y - point.y).abs() <= self.precision;
        near.then_some(found)
    }

    /// Check if rulings cross at `point`.
    pub fn contains(&self, point: &Point) -> bool {
        self.get(point).is_some()
    }

    /// Intersections in top-to-bottom, left-to-right order.
    pub fn iter(&self) -> impl Iterator<Item = &Intersection> {
        self.points.values()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&PointKey, &Intersection)> {
        self.points.iter()
    }

    pub(crate) fn get_key(&self, key: &PointKey) -> Option<&Intersection> {
        self.points.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_grid() {
        let h = vec![Ruling::horizontal(0.0, 0.0, 100.0), Ruling::horizontal(50.0, 0.0, 100.0)];
        let v = vec![Ruling::vertical(0.0, 0.0, 50.0), Ruling::vertical(100.0, 0.0, 50.0)];
        let index = IntersectionIndex::build(&h, &v, &GridConfig::default());

        assert_eq!(index.len(), 4);
        let corner = index.get(&Point::new(100.0, 50.0)).unwrap();
        assert_eq!(corner.horizontal, h[1]);
        assert_eq!(corner.vertical, v[1]);
    }

    #[test]
    fn test_tolerance_closes_short_corner() {
        let h = vec![Ruling::horizontal(10.0, 0.0, 98.5)];
        let v = vec![Ruling::vertical(100.0, 11.5, 60.0)];

        let index = IntersectionIndex::build(&h, &v, &GridConfig::default());
        assert!(index.contains(&Point::new(100.0, 10.0)));

        let strict = GridConfig {
            intersection_tolerance: 1.0,
            ..GridConfig::default()
        };
        assert!(IntersectionIndex::build(&h, &v, &strict).is_empty());
    }

    #[test]
    fn test_close_points_share_a_key() {
        let index = IntersectionIndex::build(
            &[Ruling::horizontal(10.0, 0.0, 100.0)],
            &[Ruling::vertical(50.0, 0.0, 20.0)],
            &GridConfig::default(),
        );
        assert!(index.contains(&Point::new(50.004, 9.997)));
        assert!(!index.contains(&Point::new(50.5, 10.0)));
    }

    #[test]
    fn test_points_straddling_a_rounding_boundary_are_one_point() {
        // 50.004 and 50.006 round to different multiples of 0.01
        let h = vec![Ruling::horizontal(10.0, 0.0, 100.0)];
        let v = vec![Ruling::vertical(50.004, 0.0, 20.0), Ruling::vertical(50.006, 0.0, 20.0)];
        let index = IntersectionIndex::build(&h, &v, &GridConfig::default());

        assert_eq!(index.len(), 1);
        let point = index.get(&Point::new(50.006, 10.0)).unwrap();
        assert_eq!(point.vertical, v[0]);
    }

    #[test]
    fn test_chained_coordinates_share_a_column() {
        let h = vec![Ruling::horizontal(0.0, 0.0, 100.0), Ruling::horizontal(50.0, 0.0, 100.0)];
        let v = vec![Ruling::vertical(0.0, 0.0, 50.0), Ruling::vertical(99.995, 0.0, 50.0)];
        let index = IntersectionIndex::build(&h, &v, &GridConfig::default());

        assert_eq!(index.len(), 4);
        assert!(index.contains(&Point::new(100.004, 50.0)));
        assert!(!index.contains(&Point::new(100.02, 50.0)));
        assert!(!index.contains(&Point::new(30.0, 50.0)));
    }

    #[test]
    fn test_iteration_order() {
        let h = vec![Ruling::horizontal(50.0, 0.0, 100.0), Ruling::horizontal(0.0, 0.0, 100.0)];
        let v = vec![Ruling::vertical(100.0, 0.0, 50.0), Ruling::vertical(0.0, 0.0, 50.0)];
        let index = IntersectionIndex::build(&h, &v, &GridConfig::default());
        let points: Vec<Point> = index.iter().map(|i| i.point).collect();
        assert_eq!(points, vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 50.0),
            Point::new(100.0, 50.0),
        ]);
    }
}
