//! Cell-text assigner: put merged text onto a ruled or unruled grid.

use crate::config::GridConfig;
use crate::elements::{ExtractionMethod, Table, TableCell, TextLine, TextRun};
use crate::geometry::{Point, Rect};
use crate::layout::regions::CellRegion;

/// Cluster coordinates within `tolerance` of their cluster's first value,
/// returning the cluster means in ascending order.
fn cluster_edges(mut values: Vec<f32>, tolerance: f32) -> Vec<f32> {
    values.retain(|v| v.is_finite());
    values.sort_by(f32::total_cmp);

    let mut edges = Vec::new();
    let mut start = 0;
    while start < values.len() {
        let first = values[start];
        let mut end = start + 1;
        while end < values.len() && values[end] - first <= tolerance {
            end += 1;
        }
        edges.push(values[start..end].iter().sum::<f32>() / (end - start) as f32);
        start = end;
    }
    edges
}

/// Index of the edge nearest to `value`.
fn nearest_edge(edges: &[f32], value: f32) -> usize {
    let i = edges.partition_point(|e| *e < value);
    if i == 0 {
        0
    } else if i == edges.len() {
        edges.len() - 1
    } else if value - edges[i - 1] <= edges[i] - value {
        i - 1
    } else {
        i
    }
}

/// Band containing `value`, given ascending band edges.
fn band_index(edges: &[f32], value: f32) -> usize {
    let bands = edges.len().saturating_sub(1).max(1);
    edges.partition_point(|e| *e <= value).saturating_sub(1).min(bands - 1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Empty,
    Anchor { cell: usize, row_span: usize, col_span: usize },
    Covered,
}

/// Lay the cells of one region out on a grid and fill them with text.
///
/// Rows and columns are the distinct cell edges of the region (clustered
/// within `cell_tolerance`). Each cell is anchored at its top-left grid
/// position and records how many rows and columns it spans; positions it
/// covers hold zero-area placeholders. Grid positions no cell covers (an
/// irregular region outline) hold empty cells.
///
/// A run goes to the laid-out cell containing its centroid. Runs whose
/// centroid misses every such cell but lies within `cell_tolerance` of the
/// region go to the nearest one; other runs are not part of this table.
/// Texts landing in one cell are joined with a space in the order given, so
/// `runs` should already be in reading order.
pub fn assign_ruled(
    page_number: u32,
    region: &CellRegion,
    runs: &[TextRun],
    config: &GridConfig,
) -> Table {
    let mut table = Table::new(page_number, ExtractionMethod::Ruled, region.bbox);

    let col_edges = cluster_edges(
        region.cells.iter().flat_map(|c| [c.left(), c.right()]).collect(),
        config.cell_tolerance,
    );
    let row_edges = cluster_edges(
        region.cells.iter().flat_map(|c| [c.top(), c.bottom()]).collect(),
        config.cell_tolerance,
    );
    if col_edges.len() < 2 || row_edges.len() < 2 {
        return table;
    }
    let (n_rows, n_cols) = (row_edges.len() - 1, col_edges.len() - 1);

    let mut grid = vec![vec![Slot::Empty; n_cols]; n_rows];
    let mut anchored = vec![false; region.cells.len()];
    for (i, cell) in region.cells.iter().enumerate() {
        let r0 = nearest_edge(&row_edges, cell.top()).min(n_rows - 1);
        let c0 = nearest_edge(&col_edges, cell.left()).min(n_cols - 1);
        let r1 = nearest_edge(&row_edges, cell.bottom()).clamp(r0 + 1, n_rows);
        let c1 = nearest_edge(&col_edges, cell.right()).clamp(c0 + 1, n_cols);

        if grid[r0][c0] != Slot::Empty {
            log::warn!("Cell {:?} overlaps an earlier cell, its text goes to a neighbour", cell);
            continue;
        }
        for row in grid.iter_mut().take(r1).skip(r0) {
            for slot in row.iter_mut().take(c1).skip(c0) {
                if *slot == Slot::Empty {
                    *slot = Slot::Covered;
                }
            }
        }
        grid[r0][c0] = Slot::Anchor {
            cell: i,
            row_span: r1 - r0,
            col_span: c1 - c0,
        };
        anchored[i] = true;
    }

    let mut texts: Vec<Vec<&str>> = vec![Vec::new(); region.cells.len()];
    let reach = region.bbox.expand(config.cell_tolerance);
    for run in runs.iter().filter(|r| !r.is_blank()) {
        let centroid = run.centroid();
        let target = region
            .cells
            .iter()
            .enumerate()
            .position(|(i, c)| anchored[i] && c.contains_point(&centroid))
            .or_else(|| {
                if !reach.contains_point(&centroid) {
                    return None;
                }
                nearest_cell(&region.cells, &anchored, &centroid)
            });
        if let Some(i) = target {
            texts[i].push(run.text.trim());
        }
    }

    for (r, row) in grid.iter().enumerate() {
        let cells = row
            .iter()
            .enumerate()
            .map(|(c, slot)| match *slot {
                Slot::Anchor {
                    cell,
                    row_span,
                    col_span,
                } => TableCell::new(region.cells[cell], texts[cell].join(" "))
                    .with_span(row_span, col_span),
                Slot::Covered => TableCell::placeholder(Point::new(col_edges[c], row_edges[r])),
                Slot::Empty => {
                    let (left, top) = (col_edges[c], row_edges[r]);
                    let (right, bottom) = (col_edges[c + 1], row_edges[r + 1]);
                    TableCell::new(Rect::from_points(left, top, right, bottom), "")
                },
            })
            .collect();
        table.add_row(cells);
    }
    table
}

fn nearest_cell(cells: &[Rect], anchored: &[bool], point: &Point) -> Option<usize> {
    cells
        .iter()
        .enumerate()
        .filter(|(i, _)| anchored[*i])
        .min_by(|(_, a), (_, b)| a.distance_to_point(point).total_cmp(&b.distance_to_point(point)))
        .map(|(i, _)| i)
}

/// Build an unruled table from text lines and separator positions.
///
/// `bounds` is the table rectangle; separators outside it are ignored. Every
/// run is bucketed by its centroid into one column band and one row band,
/// and the texts of a band pair are joined with a space in reading order.
/// Without lines the table has no rows.
pub fn assign_unruled(
    page_number: u32,
    bounds: Rect,
    lines: &[TextLine],
    column_separators: &[f32],
    row_separators: &[f32],
) -> Table {
    let mut table = Table::new(page_number, ExtractionMethod::Unruled, bounds);
    if lines.iter().all(|l| l.runs.is_empty()) {
        return table;
    }

    let edges = |lo: f32, hi: f32, separators: &[f32]| {
        let mut edges = vec![lo];
        let mut inner: Vec<f32> =
            separators.iter().copied().filter(|s| *s > lo && *s < hi).collect();
        inner.sort_by(f32::total_cmp);
        inner.dedup();
        edges.extend(inner);
        edges.push(hi);
        edges
    };
    let xs = edges(bounds.left(), bounds.right(), column_separators);
    let ys = edges(bounds.top(), bounds.bottom(), row_separators);
    let (n_rows, n_cols) = (ys.len() - 1, xs.len() - 1);

    let mut texts: Vec<Vec<Vec<&str>>> = vec![vec![Vec::new(); n_cols]; n_rows];
    for run in lines.iter().flat_map(|l| &l.runs) {
        if run.is_blank() {
            continue;
        }
        let centroid = run.centroid();
        let r = band_index(&ys, centroid.y);
        let c = band_index(&xs, centroid.x);
        texts[r][c].push(run.text.trim());
    }

    for (r, row) in texts.iter().enumerate() {
        let cells = row
            .iter()
            .enumerate()
            .map(|(c, parts)| {
                let bbox = Rect::from_points(xs[c], ys[r], xs[c + 1], ys[r + 1]);
                TableCell::new(bbox, parts.join(" "))
            })
            .collect();
        table.add_row(cells);
    }
    log::debug!("Unruled table with {} rows and {} columns", n_rows, n_cols);
    table
}
