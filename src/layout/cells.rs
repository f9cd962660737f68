//! Grid/cell builder for ruled tables.

use std::collections::BTreeMap;

use crate::config::GridConfig;
use crate::elements::Ruling;
use crate::geometry::Rect;
use crate::layout::intersections::{IntersectionIndex, PointKey};
use crate::layout::rulings::canonical_order;

/// Find the minimal rectangular cells enclosed by rulings.
///
/// For every intersection, taken as a candidate top-left corner, the
/// candidates below it on the same vertical ruling and to its right on the
/// same horizontal ruling are tried nearest first. A cell is emitted for the
/// first pair whose bottom-right corner exists and is reached by the same
/// horizontal ruling as the bottom-left corner and the same vertical ruling
/// as the top-right corner. Taking the nearest closing corner keeps cells
/// minimal; when an internal ruling is missing the nearest closing corner
/// lies further away and a single spanning cell is produced.
///
/// Returns no cells when there are fewer than two rulings in either
/// direction. The result does not depend on the order of the inputs.
///
/// # Examples
///
/// ```
/// use table_oxide::config::GridConfig;
/// use table_oxide::elements::Ruling;
/// use table_oxide::layout::find_cells;
///
/// let h = [Ruling::horizontal(0.0, 0.0, 100.0), Ruling::horizontal(20.0, 0.0, 100.0)];
/// let v = [
///     Ruling::vertical(0.0, 0.0, 20.0),
///     Ruling::vertical(40.0, 0.0, 20.0),
///     Ruling::vertical(100.0, 0.0, 20.0),
/// ];
/// let cells = find_cells(&h, &v, &GridConfig::default());
/// assert_eq!(cells.len(), 2);
/// assert_eq!(cells[1].left(), 40.0);
/// ```
pub fn find_cells(horizontal: &[Ruling], vertical: &[Ruling], config: &GridConfig) -> Vec<Rect> {
    if horizontal.len() < 2 || vertical.len() < 2 {
        log::debug!(
            "Not enough rulings for a grid ({} horizontal, {} vertical)",
            horizontal.len(),
            vertical.len()
        );
        return Vec::new();
    }

    let mut horizontal = horizontal.to_vec();
    let mut vertical = vertical.to_vec();
    horizontal.sort_by(canonical_order);
    vertical.sort_by(canonical_order);

    let index = IntersectionIndex::build(&horizontal, &vertical, config);
    let cells = cells_from_index(&index);
    log::debug!("Found {} cells from {} intersections", cells.len(), index.len());
    cells
}

/// Cell search over an existing intersection index.
pub(crate) fn cells_from_index(index: &IntersectionIndex) -> Vec<Rect> {
    // Keys sharing an x (a column of points) or a y (a row of points), each
    // list in ascending order of the other coordinate.
    let mut columns: BTreeMap<i64, Vec<PointKey>> = BTreeMap::new();
    let mut rows: BTreeMap<i64, Vec<PointKey>> = BTreeMap::new();
    for (key, _) in index.entries() {
        columns.entry(key.x).or_default().push(*key);
        rows.entry(key.y).or_default().push(*key);
    }

    let mut cells = Vec::new();
    for (top_left_key, top_left) in index.entries() {
        let below = columns
            .get(&top_left_key.x)
            .map(|keys| keys.iter().filter(|k| k.y > top_left_key.y).collect::<Vec<_>>())
            .unwrap_or_default();
        let right = rows
            .get(&top_left_key.y)
            .map(|keys| keys.iter().filter(|k| k.x > top_left_key.x).collect::<Vec<_>>())
            .unwrap_or_default();

        'below: for bottom_left_key in &below {
            let Some(bottom_left) = index.get_key(bottom_left_key) else {
                continue;
            };
            // The left side must run along one vertical ruling
            if bottom_left.vertical != top_left.vertical {
                continue;
            }
            for top_right_key in &right {
                let Some(top_right) = index.get_key(top_right_key) else {
                    continue;
                };
                if top_right.horizontal != top_left.horizontal {
                    continue;
                }
                let corner_key = PointKey {
                    y: bottom_left_key.y,
                    x: top_right_key.x,
                };
                let Some(bottom_right) = index.get_key(&corner_key) else {
                    continue;
                };
                if bottom_right.horizontal == bottom_left.horizontal
                    && bottom_right.vertical == top_right.vertical
                {
                    cells.push(Rect::from_points(
                        top_left.point.x,
                        top_left.point.y,
                        bottom_right.point.x,
                        bottom_right.point.y,
                    ));
                    break 'below;
                }
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-column grid with a full-width header row: nine horizontal rulings
    /// and three vertical ones, the middle vertical starting below the header.
    fn fixture_rulings() -> (Vec<Ruling>, Vec<Ruling>) {
        let horizontal = [40.0, 44.0, 50.0, 54.0, 60.0, 64.0, 70.0, 74.0, 80.0]
            .iter()
            .map(|&y| Ruling::from_top_left(y, 18.0, 208.0, 0.0))
            .collect();
        let vertical = vec![
            Ruling::from_top_left(40.0, 18.0, 0.0, 40.0),
            Ruling::from_top_left(44.0, 70.0, 0.0, 36.0),
            Ruling::from_top_left(40.0, 226.0, 0.0, 40.0),
        ];
        (horizontal, vertical)
    }

    fn expected_fixture_cells() -> Vec<Rect> {
        let mut expected = vec![Rect::from_top_left(40.0, 18.0, 208.0, 4.0)];
        let bands = [
            (44.0, 6.0),
            (50.0, 4.0),
            (54.0, 6.0),
            (60.0, 4.0),
            (64.0, 6.0),
            (70.0, 4.0),
            (74.0, 6.0),
        ];
        for (top, height) in bands {
            expected.push(Rect::from_top_left(top, 18.0, 52.0, height));
            expected.push(Rect::from_top_left(top, 70.0, 156.0, height));
        }
        expected
    }

    #[test]
    fn test_fixture_yields_fifteen_cells() {
        let (h, v) = fixture_rulings();
        let cells = find_cells(&h, &v, &GridConfig::default());
        assert_eq!(cells.len(), 15);
        assert_eq!(cells, expected_fixture_cells());
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let (mut h, mut v) = fixture_rulings();
        let baseline = find_cells(&h, &v, &GridConfig::default());
        h.reverse();
        v.rotate_left(1);
        assert_eq!(find_cells(&h, &v, &GridConfig::default()), baseline);
    }

    #[test]
    fn test_missing_internal_ruling_gives_spanning_cell() {
        let h = vec![
            Ruling::horizontal(0.0, 0.0, 100.0),
            Ruling::horizontal(10.0, 0.0, 50.0),
            Ruling::horizontal(20.0, 0.0, 100.0),
        ];
        let v = vec![
            Ruling::vertical(0.0, 0.0, 20.0),
            Ruling::vertical(50.0, 0.0, 20.0),
            Ruling::vertical(100.0, 0.0, 20.0),
        ];
        let cells = find_cells(&h, &v, &GridConfig::default());
        assert_eq!(cells, vec![
            Rect::from_points(0.0, 0.0, 50.0, 10.0),
            Rect::from_points(50.0, 0.0, 100.0, 20.0),
            Rect::from_points(0.0, 10.0, 50.0, 20.0),
        ]);
    }

    #[test]
    fn test_too_few_rulings() {
        let h = vec![Ruling::horizontal(0.0, 0.0, 100.0)];
        let v = vec![Ruling::vertical(0.0, 0.0, 20.0), Ruling::vertical(100.0, 0.0, 20.0)];
        assert!(find_cells(&h, &v, &GridConfig::default()).is_empty());
        assert!(find_cells(&[], &[], &GridConfig::default()).is_empty());
    }

    #[test]
    fn test_crossing_rulings_without_enclosure() {
        // A plus sign: four intersections would be needed, only one exists
        let h = vec![Ruling::horizontal(50.0, 0.0, 100.0), Ruling::horizontal(200.0, 0.0, 10.0)];
        let v = vec![Ruling::vertical(50.0, 0.0, 100.0), Ruling::vertical(300.0, 0.0, 10.0)];
        assert!(find_cells(&h, &v, &GridConfig::default()).is_empty());
    }
}
