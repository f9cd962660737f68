//! Ruling normalization.
//!
//! Raw segments from the decoder are noisy: borders are drawn as several
//! overlapping strokes, endpoints miss each other by fractions of a point and
//! a few segments are diagonal or degenerate. Normalization turns them into
//! two clean sets:
//!
//! 1. drop non-finite and zero-length segments, classify the rest by angle
//!    and set oblique ones aside
//! 2. straighten each segment onto its axis
//! 3. snap every x and every y coordinate to the mean of its cluster
//! 4. collapse collinear segments that overlap or nearly abut
//! 5. crop to the area of interest
//!
//! The output is sorted by `(position, start)` so that every later stage sees
//! the same order whatever order the decoder produced.

use std::cmp::Ordering;

use crate::config::RulingConfig;
use crate::elements::{Orientation, Ruling};
use crate::geometry::Rect;

/// Counts of segments dropped or folded during normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Segments with NaN or infinite coordinates
    pub non_finite: usize,
    /// Segments shorter than the configured minimum length
    pub degenerate: usize,
    /// Segments neither horizontal nor vertical
    pub oblique: usize,
    /// Segments wholly outside the crop area
    pub outside_area: usize,
    /// Segments folded into a collinear neighbour
    pub merged: usize,
}

impl NormalizationReport {
    /// Number of malformed segments (non-finite or degenerate).
    pub fn malformed(&self) -> usize {
        self.non_finite + self.degenerate
    }

    /// Number of segments that did not survive in any form.
    pub fn dropped(&self) -> usize {
        self.non_finite + self.degenerate + self.oblique + self.outside_area
    }
}

/// Horizontal and vertical rulings ready for grid inference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRulings {
    /// Horizontal rulings sorted by `(y, x_start)`
    pub horizontal: Vec<Ruling>,
    /// Vertical rulings sorted by `(x, y_start)`
    pub vertical: Vec<Ruling>,
    /// What was dropped along the way
    pub report: NormalizationReport,
}

impl NormalizedRulings {
    /// Total number of surviving rulings.
    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    /// Check if no ruling survived.
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    /// At least two rulings in each direction, the minimum for a cell.
    pub fn can_form_grid(&self) -> bool {
        self.horizontal.len() >= 2 && self.vertical.len() >= 2
    }
}

/// Normalize raw segments into horizontal and vertical rulings.
///
/// # Arguments
///
/// * `raw` - Segments in decoder order
/// * `area` - Optional crop area; rulings are clipped to it
/// * `config` - Tolerances
///
/// # Examples
///
/// ```
/// use table_oxide::config::RulingConfig;
/// use table_oxide::elements::Ruling;
/// use table_oxide::layout::normalize_rulings;
///
/// let raw = vec![
///     Ruling::horizontal(10.0, 0.0, 50.0),
///     Ruling::horizontal(10.2, 49.5, 100.0),
///     Ruling::new(0.0, 0.0, 30.0, 30.0),
/// ];
/// let rulings = normalize_rulings(&raw, None, &RulingConfig::default());
/// assert_eq!(rulings.horizontal.len(), 1);
/// assert_eq!(rulings.horizontal[0].end(), 100.0);
/// assert_eq!(rulings.report.oblique, 1);
/// ```
pub fn normalize_rulings(
    raw: &[Ruling],
    area: Option<&Rect>,
    config: &RulingConfig,
) -> NormalizedRulings {
    let mut report = NormalizationReport::default();
    let mut straight = Vec::with_capacity(raw.len());

    for ruling in raw {
        if !ruling.is_finite() {
            report.non_finite += 1;
            continue;
        }
        if ruling.length() < config.min_length {
            report.degenerate += 1;
            continue;
        }
        match ruling.classify(config.orientation_tolerance_degrees) {
            Orientation::Oblique => report.oblique += 1,
            orientation => straight.push(ruling.straightened(orientation)),
        }
    }

    snap_coordinates(&mut straight, config.snap_tolerance);

    let (mut horizontal, mut vertical): (Vec<Ruling>, Vec<Ruling>) = (Vec::new(), Vec::new());
    for ruling in straight {
        // Snapping can pull both ends of a short segment together
        if ruling.length() < config.min_length {
            report.degenerate += 1;
        } else if ruling.is_horizontal() {
            horizontal.push(ruling);
        } else {
            vertical.push(ruling);
        }
    }

    horizontal = collapse_oriented(horizontal, config, &mut report);
    vertical = collapse_oriented(vertical, config, &mut report);

    if let Some(area) = area {
        horizontal = crop(horizontal, area, &mut report);
        vertical = crop(vertical, area, &mut report);
    }

    if report.malformed() > 0 {
        log::warn!(
            "Dropped {} malformed rulings ({} non-finite, {} zero-length)",
            report.malformed(),
            report.non_finite,
            report.degenerate
        );
    }
    log::debug!(
        "Normalized {} raw rulings into {} horizontal and {} vertical \
         ({} oblique, {} merged, {} outside area)",
        raw.len(),
        horizontal.len(),
        vertical.len(),
        report.oblique,
        report.merged,
        report.outside_area
    );

    NormalizedRulings {
        horizontal,
        vertical,
        report,
    }
}

/// Total order on axis-aligned rulings: position, then start, then end.
pub(crate) fn canonical_order(a: &Ruling, b: &Ruling) -> Ordering {
    a.position()
        .total_cmp(&b.position())
        .then(a.start().total_cmp(&b.start()))
        .then(a.end().total_cmp(&b.end()))
}

/// Which coordinate of a ruling a snapped value belongs to.
#[derive(Clone, Copy)]
enum Slot {
    X1,
    Y1,
    X2,
    Y2,
}

fn slot_value(r: &Ruling, slot: Slot) -> f32 {
    match slot {
        Slot::X1 => r.x1,
        Slot::Y1 => r.y1,
        Slot::X2 => r.x2,
        Slot::Y2 => r.y2,
    }
}

fn set_slot(r: &mut Ruling, slot: Slot, value: f32) {
    match slot {
        Slot::X1 => r.x1 = value,
        Slot::Y1 => r.y1 = value,
        Slot::X2 => r.x2 = value,
        Slot::Y2 => r.y2 = value,
    }
}

/// Snap all x coordinates, then all y coordinates, to their cluster means.
///
/// Values are sorted and a cluster grows while a value stays within
/// `tolerance` of the cluster's first value. Snapping x and y separately
/// lets horizontal endpoints land exactly on vertical rulings and vice versa.
fn snap_coordinates(rulings: &mut [Ruling], tolerance: f32) {
    for slots in [[Slot::X1, Slot::X2], [Slot::Y1, Slot::Y2]] {
        let mut values: Vec<(f32, usize, Slot)> = rulings
            .iter()
            .enumerate()
            .flat_map(|(i, r)| slots.iter().map(move |&s| (slot_value(r, s), i, s)))
            .collect();
        values.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut start = 0;
        while start < values.len() {
            let first = values[start].0;
            let mut end = start + 1;
            while end < values.len() && values[end].0 - first <= tolerance {
                end += 1;
            }
            let cluster = &values[start..end];
            let mean = cluster.iter().map(|v| v.0).sum::<f32>() / cluster.len() as f32;
            for &(_, i, slot) in cluster {
                set_slot(&mut rulings[i], slot, mean);
            }
            start = end;
        }
    }
}

/// Merge collinear rulings that overlap or leave a gap of at most `merge_gap`.
///
/// Rulings are grouped by position (within `collinear_tolerance` of the
/// group's first position) and each group is swept by start coordinate, so
/// no two surviving rulings could still be merged.
fn collapse_oriented(
    mut rulings: Vec<Ruling>,
    config: &RulingConfig,
    report: &mut NormalizationReport,
) -> Vec<Ruling> {
    rulings.sort_by(canonical_order);

    let mut collapsed = Vec::with_capacity(rulings.len());
    let mut start = 0;
    while start < rulings.len() {
        let position = rulings[start].position();
        let mut end = start + 1;
        while end < rulings.len()
            && rulings[end].position() - position <= config.collinear_tolerance
        {
            end += 1;
        }

        let mut group: Vec<Ruling> = rulings[start..end].to_vec();
        group.sort_by(|a, b| a.start().total_cmp(&b.start()).then(a.end().total_cmp(&b.end())));

        let mut current = group[0];
        for next in &group[1..] {
            if current.nearly_abuts(next, config.merge_gap) {
                current = current.with_extent(current.start(), current.end().max(next.end()));
                report.merged += 1;
            } else {
                collapsed.push(current);
                current = *next;
            }
        }
        collapsed.push(current);
        start = end;
    }

    collapsed.sort_by(canonical_order);
    collapsed
}

fn crop(rulings: Vec<Ruling>, area: &Rect, report: &mut NormalizationReport) -> Vec<Ruling> {
    rulings
        .into_iter()
        .filter_map(|r| {
            let clipped = r.clip(area);
            if clipped.is_none() {
                report.outside_area += 1;
            }
            clipped
        })
        .collect()
}
