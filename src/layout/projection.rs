//! Projection-profile column and row finder for unruled tables.
//!
//! Text coverage is projected onto one axis as a histogram: over x, each
//! run adds its height to the bins it covers; over y, each run adds its
//! width. The histogram is box-smoothed with a kernel about one glyph wide
//! (or one line high), differentiated, and the valleys between a falling and
//! a rising edge become separators when the raw histogram is empty there.
//!
//! Rows are additionally anchored on the text lines themselves: every gap
//! between two consecutive lines holds exactly one row separator, so lines
//! set without leading still land in different rows.
//!
//! Noise floor and kernel sizes are configurable; see [`ProjectionConfig`].

use crate::config::ProjectionConfig;
use crate::elements::{Ruling, TextLine, TextRun};
use crate::geometry::Rect;

/// Upper bound on histogram bins; larger extents get an empty profile.
pub const MAX_BINS: usize = 1 << 22;

/// A 1-D text coverage histogram along x or y.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionProfile {
    origin: f32,
    resolution: f32,
    values: Vec<f32>,
}

impl ProjectionProfile {
    /// Empty profile covering `[origin, origin + extent]`.
    ///
    /// Extents needing more than [`MAX_BINS`] bins give a profile without
    /// bins, which has no separators.
    pub fn new(origin: f32, extent: f32, resolution: f32) -> Self {
        let wanted = extent * resolution;
        let bins = if !wanted.is_finite() || wanted <= 0.0 {
            0
        } else if wanted > MAX_BINS as f32 {
            log::warn!("Projection extent {} needs {} bins, skipping profile", extent, wanted);
            0
        } else {
            wanted.ceil() as usize
        };
        Self {
            origin,
            resolution,
            values: vec![0.0; bins],
        }
    }

    /// Profile over x: each run adds its height across its width.
    pub fn horizontal(lines: &[TextLine], bounds: &Rect, resolution: f32) -> Self {
        let mut profile = Self::new(bounds.left(), bounds.width, resolution);
        for run in lines.iter().flat_map(|l| &l.runs) {
            profile.add(run.bbox.left(), run.bbox.right(), run.bbox.height);
        }
        profile
    }

    /// Profile over y: each run adds its width across its height.
    pub fn vertical(lines: &[TextLine], bounds: &Rect, resolution: f32) -> Self {
        let mut profile = Self::new(bounds.top(), bounds.height, resolution);
        for run in lines.iter().flat_map(|l| &l.runs) {
            profile.add(run.bbox.top(), run.bbox.bottom(), run.bbox.width);
        }
        profile
    }

    /// Add `weight` to every bin overlapping `[start, end)`.
    pub fn add(&mut self, start: f32, end: f32, weight: f32) {
        if self.values.is_empty() || !weight.is_finite() {
            return;
        }
        let last_bin = self.values.len() as i64 - 1;
        let first = (((start - self.origin) * self.resolution).floor() as i64).clamp(0, last_bin);
        let last =
            ((((end - self.origin) * self.resolution).ceil() as i64) - 1).clamp(first, last_bin);
        for value in &mut self.values[first as usize..=last as usize] {
            *value += weight;
        }
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the profile has no bins.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw bin values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Page coordinate of the left/top edge of `bin`.
    pub fn position(&self, bin: usize) -> f32 {
        self.origin + bin as f32 / self.resolution
    }

    /// Box-smoothed copy of the values; `kernel` is in page units.
    pub fn smoothed(&self, kernel: f32) -> Vec<f32> {
        let window = (kernel * self.resolution).round().max(1.0) as usize;
        let half = (window - 1) / 2;
        if half == 0 || self.values.is_empty() {
            return self.values.clone();
        }

        let mut prefix = Vec::with_capacity(self.values.len() + 1);
        prefix.push(0.0f32);
        for v in &self.values {
            prefix.push(prefix[prefix.len() - 1] + v);
        }
        (0..self.values.len())
            .map(|i| {
                let lo = i.saturating_sub(half);
                let hi = (i + half).min(self.values.len() - 1);
                (prefix[hi + 1] - prefix[lo]) / (hi - lo + 1) as f32
            })
            .collect()
    }

    /// First discrete derivative with magnitudes below `noise_floor` zeroed.
    pub fn derivative(values: &[f32], noise_floor: f32) -> Vec<f32> {
        values
            .windows(2)
            .map(|w| {
                let d = w[1] - w[0];
                if d.abs() < noise_floor {
                    0.0
                } else {
                    d
                }
            })
            .collect()
    }

    /// Separator positions, ascending.
    ///
    /// A valley runs from just after the last falling step to the next
    /// rising step of the smoothed profile. It yields a separator at its
    /// midpoint if some raw bin inside it is at most `noise_floor`, which
    /// keeps dips inside dense text from splitting a column.
    pub fn separators(&self, kernel: f32, noise_floor: f32) -> Vec<f32> {
        let smoothed = self.smoothed(kernel);
        let slope = Self::derivative(&smoothed, noise_floor);

        let mut separators = Vec::new();
        let mut last_fall: Option<usize> = None;
        for (i, d) in slope.iter().enumerate() {
            if *d < 0.0 {
                last_fall = Some(i);
            } else if *d > 0.0 {
                if let Some(fall) = last_fall.take() {
                    let (first, last) = (fall + 1, i);
                    let empty = self.values[first..=last].iter().any(|v| *v <= noise_floor);
                    if empty {
                        separators.push((self.position(first) + self.position(last + 1)) / 2.0);
                    }
                }
            }
        }
        separators
    }
}

fn runs(lines: &[TextLine]) -> impl Iterator<Item = &TextRun> {
    lines.iter().flat_map(|l| &l.runs)
}

/// Total run width over total character count.
fn average_glyph_width(lines: &[TextLine]) -> Option<f32> {
    let (width, chars) = runs(lines).fold((0.0f32, 0usize), |(w, c), r| {
        (w + r.bbox.width, c + r.elements.iter().map(|e| e.char_count()).sum::<usize>())
    });
    (chars > 0 && width > 0.0).then(|| width / chars as f32)
}

fn average_run_height(lines: &[TextLine]) -> Option<f32> {
    let (height, count) =
        runs(lines).fold((0.0f32, 0usize), |(h, c), r| (h + r.bbox.height, c + 1));
    (count > 0 && height > 0.0).then(|| height / count as f32)
}

/// Rulings that cross the whole text block become separators.
///
/// A vertical ruling strictly inside the block's x range whose extent covers
/// at least `coverage` of the block height is a column separator; horizontal
/// rulings likewise give row separators.
pub fn explicit_separators(
    rulings: &[Ruling],
    bounds: &Rect,
    vertical: bool,
    coverage: f32,
) -> Vec<f32> {
    let (lo, hi, span_lo, span_hi) = if vertical {
        (bounds.left(), bounds.right(), bounds.top(), bounds.bottom())
    } else {
        (bounds.top(), bounds.bottom(), bounds.left(), bounds.right())
    };
    let span = span_hi - span_lo;

    let mut found: Vec<f32> = rulings
        .iter()
        .filter(|r| if vertical { r.is_vertical() } else { r.is_horizontal() })
        .filter(|r| r.position() > lo && r.position() < hi)
        .filter(|r| {
            let covered = r.end().min(span_hi) - r.start().max(span_lo);
            span > 0.0 && covered >= coverage * span
        })
        .map(Ruling::position)
        .collect();
    found.sort_by(f32::total_cmp);
    found.dedup();
    found
}

/// Merge explicit and profile separators, dropping profile ones within
/// `radius` of an explicit one.
fn combine(explicit: Vec<f32>, found: Vec<f32>, radius: f32) -> Vec<f32> {
    let mut all: Vec<f32> = found
        .into_iter()
        .filter(|f| explicit.iter().all(|e| (e - f).abs() >= radius))
        .collect();
    all.extend(explicit);
    all.sort_by(f32::total_cmp);
    all.dedup();
    all
}

/// Column separator x positions for a block of text lines.
///
/// Caller-supplied `column_positions` take precedence; otherwise explicit
/// vertical rulings are combined with the x projection profile.
pub fn column_separators(
    lines: &[TextLine],
    bounds: &Rect,
    vertical_rulings: &[Ruling],
    config: &ProjectionConfig,
) -> Vec<f32> {
    if let Some(positions) = &config.column_positions {
        let mut inside: Vec<f32> = positions
            .iter()
            .copied()
            .filter(|x| *x > bounds.left() && *x < bounds.right())
            .collect();
        inside.sort_by(f32::total_cmp);
        inside.dedup();
        return inside;
    }

    let explicit =
        explicit_separators(vertical_rulings, bounds, true, config.explicit_ruling_coverage);
    let found = match config.horizontal_kernel.or_else(|| average_glyph_width(lines)) {
        Some(kernel) => ProjectionProfile::horizontal(lines, bounds, config.resolution)
            .separators(kernel, config.noise_floor),
        None => Vec::new(),
    };
    log::debug!("Column separators: {} explicit, {} from projection", explicit.len(), found.len());
    combine(explicit, found, config.min_column_width)
}

/// One separator per gap between consecutive lines.
///
/// A projection valley inside the gap gives the position; otherwise the
/// separator sits halfway between the bottom of one line and the top of the
/// next, which for touching or slightly overlapping lines is their shared
/// edge. Lines are taken in top order.
fn line_separators(lines: &[TextLine], valleys: &[f32]) -> Vec<f32> {
    let mut spans: Vec<(f32, f32)> = lines
        .iter()
        .filter(|l| l.bbox.is_finite())
        .map(|l| (l.bbox.top(), l.bbox.bottom()))
        .collect();
    spans.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let mut separators: Vec<f32> = spans
        .windows(2)
        .map(|w| {
            let (above, below) = (w[0].1, w[1].0);
            let (lo, hi) = (above.min(below), above.max(below));
            valleys
                .iter()
                .copied()
                .find(|v| *v >= lo && *v <= hi)
                .unwrap_or((above + below) / 2.0)
        })
        .collect();
    separators.sort_by(f32::total_cmp);
    separators.dedup();
    separators
}

/// Row separator y positions for a block of text lines.
///
/// Every pair of consecutive lines is split; the y projection profile only
/// decides where inside the gap the separator goes.
pub fn row_separators(
    lines: &[TextLine],
    bounds: &Rect,
    horizontal_rulings: &[Ruling],
    config: &ProjectionConfig,
) -> Vec<f32> {
    let explicit =
        explicit_separators(horizontal_rulings, bounds, false, config.explicit_ruling_coverage);
    let valleys = match config.vertical_kernel.or_else(|| average_run_height(lines)) {
        Some(kernel) => ProjectionProfile::vertical(lines, bounds, config.resolution)
            .separators(kernel, config.noise_floor),
        None => Vec::new(),
    };
    let found = line_separators(lines, &valleys);
    log::debug!(
        "Row separators: {} explicit, {} between lines ({} projection valleys)",
        explicit.len(),
        found.len(),
        valleys.len()
    );
    combine(explicit, found, config.min_row_height)
}
