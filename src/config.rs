//! Configuration for table extraction.
//!
//! Every tolerance used by the extraction stages lives here, grouped by the
//! stage that consumes it. Defaults are tuned for PDF point units (1/72 in).
//! The projection-profile noise floor and kernel sizes have no closed-form
//! value and are exposed so callers can tune them per document family.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ruling normalization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulingConfig {
    /// Maximum slant (degrees) for a segment to count as horizontal/vertical
    pub orientation_tolerance_degrees: f32,
    /// Endpoint coordinates closer than this are snapped to their mean
    pub snap_tolerance: f32,
    /// Rulings whose positions differ by at most this are collinear
    pub collinear_tolerance: f32,
    /// Collinear rulings separated by at most this gap are merged
    pub merge_gap: f32,
    /// Segments shorter than this are degenerate and dropped
    pub min_length: f32,
}

impl Default for RulingConfig {
    fn default() -> Self {
        Self {
            orientation_tolerance_degrees: 1.0,
            snap_tolerance: 1.0,
            collinear_tolerance: 0.01,
            merge_gap: 1.0,
            min_length: 0.01,
        }
    }
}

/// Intersection and cell construction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Rulings are lengthened by this much when testing whether they cross
    pub intersection_tolerance: f32,
    /// Intersection points closer than this are the same point
    pub point_precision: f32,
    /// Slack for text-to-cell containment and grid edge clustering
    pub cell_tolerance: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            intersection_tolerance: 2.0,
            point_precision: 0.01,
            cell_tolerance: 1.0,
        }
    }
}

/// Region merging and reading-order settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Cells whose boxes are at most this far apart belong to the same table
    pub touch_tolerance: f32,
    /// Band width used when comparing coordinates for reading order
    pub reading_order_tolerance: f32,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            touch_tolerance: 1.0,
            reading_order_tolerance: 1.0,
        }
    }
}

/// Word and line merging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMergeConfig {
    /// Largest glyph gap, as a fraction of font size, still inside one run
    pub word_gap_ratio: f32,
    /// Gap, as a fraction of average char width, above which a space is inserted
    pub space_ratio: f32,
    /// Largest baseline shift, as a fraction of font size, inside one run
    pub baseline_tolerance_ratio: f32,
    /// Minimum vertical overlap ratio for two boxes to share a line
    pub line_overlap_ratio: f32,
    /// Same-text glyphs overlapping by more than this are duplicates
    pub duplicate_overlap_ratio: f32,
    /// Drop lines made of one repeated symbol spanning the text width
    pub drop_ruler_lines: bool,
}

impl Default for TextMergeConfig {
    fn default() -> Self {
        Self {
            word_gap_ratio: 0.5,
            space_ratio: 0.3,
            baseline_tolerance_ratio: 0.5,
            line_overlap_ratio: 0.1,
            duplicate_overlap_ratio: 0.5,
            drop_ruler_lines: true,
        }
    }
}

/// Projection-profile separator search settings (unruled path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Histogram bins per page unit
    pub resolution: f32,
    /// Derivative magnitudes below this are treated as flat
    pub noise_floor: f32,
    /// Smoothing kernel width for the x profile (default: average glyph width)
    pub horizontal_kernel: Option<f32>,
    /// Smoothing kernel height for the y profile (default: average run height)
    pub vertical_kernel: Option<f32>,
    /// Rulings covering this fraction of the text extent become separators
    pub explicit_ruling_coverage: f32,
    /// Found column separators this close to an explicit one are dropped
    pub min_column_width: f32,
    /// Found row separators this close to an explicit one are dropped
    pub min_row_height: f32,
    /// Caller-supplied column boundaries; replace the x profile entirely
    pub column_positions: Option<Vec<f32>>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            noise_floor: 0.1,
            horizontal_kernel: None,
            vertical_kernel: None,
            explicit_ruling_coverage: 0.95,
            min_column_width: 5.0,
            min_row_height: 2.0,
            column_positions: None,
        }
    }
}

/// Complete extraction configuration.
///
/// # Examples
///
/// ```
/// use table_oxide::config::ExtractionConfig;
///
/// let config = ExtractionConfig::default()
///     .with_noise_floor(0.5)
///     .with_column_positions(vec![120.0, 240.0]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Ruling normalization
    pub rulings: RulingConfig,
    /// Intersections and cells
    pub grid: GridConfig,
    /// Region merging and ordering
    pub regions: RegionConfig,
    /// Word and line merging
    pub text: TextMergeConfig,
    /// Projection profiles
    pub projection: ProjectionConfig,
}

impl ExtractionConfig {
    /// Create configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ruling snap tolerance.
    pub fn with_snap_tolerance(mut self, tolerance: f32) -> Self {
        self.rulings.snap_tolerance = tolerance;
        self
    }

    /// Set the intersection tolerance.
    pub fn with_intersection_tolerance(mut self, tolerance: f32) -> Self {
        self.grid.intersection_tolerance = tolerance;
        self
    }

    /// Set the projection noise floor.
    pub fn with_noise_floor(mut self, noise_floor: f32) -> Self {
        self.projection.noise_floor = noise_floor;
        self
    }

    /// Set projection smoothing kernels (`None` keeps the text-derived size).
    pub fn with_kernels(mut self, horizontal: Option<f32>, vertical: Option<f32>) -> Self {
        self.projection.horizontal_kernel = horizontal;
        self.projection.vertical_kernel = vertical;
        self
    }

    /// Use explicit column boundaries for the unruled path.
    pub fn with_column_positions(mut self, positions: Vec<f32>) -> Self {
        self.projection.column_positions = Some(positions);
        self
    }

    /// Check every value is inside its domain.
    pub fn validate(&self) -> Result<()> {
        fn non_negative(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )))
            }
        }
        fn positive(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{} must be a finite positive number, got {}",
                    name, value
                )))
            }
        }
        fn ratio(name: &str, value: f32) -> Result<()> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!("{} must be within [0, 1], got {}", name, value)))
            }
        }

        let r = &self.rulings;
        non_negative("rulings.orientation_tolerance_degrees", r.orientation_tolerance_degrees)?;
        if r.orientation_tolerance_degrees >= 45.0 {
            return Err(Error::InvalidConfig(
                "rulings.orientation_tolerance_degrees must be below 45".to_string(),
            ));
        }
        non_negative("rulings.snap_tolerance", r.snap_tolerance)?;
        non_negative("rulings.collinear_tolerance", r.collinear_tolerance)?;
        non_negative("rulings.merge_gap", r.merge_gap)?;
        non_negative("rulings.min_length", r.min_length)?;

        let g = &self.grid;
        non_negative("grid.intersection_tolerance", g.intersection_tolerance)?;
        positive("grid.point_precision", g.point_precision)?;
        non_negative("grid.cell_tolerance", g.cell_tolerance)?;

        non_negative("regions.touch_tolerance", self.regions.touch_tolerance)?;
        positive("regions.reading_order_tolerance", self.regions.reading_order_tolerance)?;

        let t = &self.text;
        non_negative("text.word_gap_ratio", t.word_gap_ratio)?;
        non_negative("text.space_ratio", t.space_ratio)?;
        non_negative("text.baseline_tolerance_ratio", t.baseline_tolerance_ratio)?;
        ratio("text.line_overlap_ratio", t.line_overlap_ratio)?;
        ratio("text.duplicate_overlap_ratio", t.duplicate_overlap_ratio)?;

        let p = &self.projection;
        positive("projection.resolution", p.resolution)?;
        non_negative("projection.noise_floor", p.noise_floor)?;
        if let Some(k) = p.horizontal_kernel {
            positive("projection.horizontal_kernel", k)?;
        }
        if let Some(k) = p.vertical_kernel {
            positive("projection.vertical_kernel", k)?;
        }
        ratio("projection.explicit_ruling_coverage", p.explicit_ruling_coverage)?;
        non_negative("projection.min_column_width", p.min_column_width)?;
        non_negative("projection.min_row_height", p.min_row_height)?;
        if let Some(positions) = &p.column_positions {
            if positions.iter().any(|x| !x.is_finite()) {
                return Err(Error::InvalidConfig(
                    "projection.column_positions must be finite".to_string(),
                ));
            }
        }
        Ok(())
    }
}
