//! Geometric table reconstruction.
//!
//! The stages run strictly in sequence on one page, each consuming the
//! previous stage's output:
//!
//! ```text
//! raw segments ─ rulings ─ intersections ─ cells ─ regions ─┐
//!                                                           ├─ assign ─ Table
//! text elements ─ text_merge ─ projection ──────────────────┘
//! ```
//!
//! - [`rulings`]: classify, snap, merge and crop raw line segments
//! - [`intersections`]: points where horizontal and vertical rulings meet
//! - [`cells`]: minimal closed rectangles bounded by rulings
//! - [`regions`]: connected groups of cells and the reading-order comparator
//! - [`text_merge`]: glyphs into words, words into lines
//! - [`projection`]: column and row separators from text density
//! - [`assign`]: text onto a ruled or unruled grid

pub mod assign;
pub mod cells;
pub mod intersections;
pub mod projection;
pub mod regions;
pub mod rulings;
pub mod text_merge;

pub use assign::{assign_ruled, assign_unruled};
pub use cells::find_cells;
pub use intersections::{Intersection, IntersectionIndex};
pub use projection::{column_separators, row_separators, ProjectionProfile};
pub use regions::{group_cells, merge_regions, CellRegion, ReadingOrder};
pub use rulings::{normalize_rulings, NormalizationReport, NormalizedRulings};
pub use text_merge::{group_lines, merge_words};
