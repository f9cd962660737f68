//! Table extraction pipeline.
//!
//! ```text
//! Page
//!   ↓
//! [ExtractionAlgorithm]  (Ruled | Unruled)
//!   ↓
//! Table[]
//! ```
//!
//! Both algorithms share the same front end (ruling normalization and word
//! merging) and differ in how the grid is found:
//!
//! - [`RuledExtractor`]: cells enclosed by rulings, grouped into regions
//! - [`UnruledExtractor`]: columns and rows from projection profiles
//!
//! [`TableExtractor`] selects between them with an [`ExtractionStrategy`];
//! `Auto` tries the ruled path and falls back to the unruled one when the
//! page has no closed cells.

mod ruled;
mod unruled;

pub use ruled::RuledExtractor;
pub use unruled::UnruledExtractor;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ExtractionConfig;
use crate::elements::{ExtractionMethod, Page, Table};
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// A way of turning one page into tables.
///
/// Implementations are pure: the same page always gives the same tables
/// and nothing outside the call is mutated, so one instance can serve many
/// pages from many threads.
pub trait ExtractionAlgorithm: Send + Sync {
    /// Extract the tables of one page.
    fn extract(&self, page: &Page) -> Vec<Table>;

    /// The method recorded on tables this algorithm produces.
    fn method(&self) -> ExtractionMethod;

    /// Return the name of this algorithm for debugging.
    fn name(&self) -> &'static str {
        self.method().as_str()
    }
}

/// Create the algorithm for one extraction method.
pub fn create_extractor(
    method: ExtractionMethod,
    config: ExtractionConfig,
) -> Box<dyn ExtractionAlgorithm> {
    match method {
        ExtractionMethod::Ruled => Box::new(RuledExtractor::new(config)),
        ExtractionMethod::Unruled => Box::new(UnruledExtractor::new(config)),
    }
}

/// Strategy token chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    /// Ruled path only
    Ruled,
    /// Unruled path only
    Unruled,
    /// Ruled when the page has closed cells, unruled otherwise
    #[default]
    Auto,
}

impl ExtractionStrategy {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStrategy::Ruled => "ruled",
            ExtractionStrategy::Unruled => "unruled",
            ExtractionStrategy::Auto => "auto",
        }
    }
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ruled" | "lattice" | "spreadsheet" => Ok(ExtractionStrategy::Ruled),
            "unruled" | "stream" | "basic" => Ok(ExtractionStrategy::Unruled),
            "auto" | "guess" => Ok(ExtractionStrategy::Auto),
            other => Err(Error::InvalidConfig(format!("unknown extraction strategy '{}'", other))),
        }
    }
}

/// Entry point: extract tables from pages with a chosen strategy.
///
/// # Examples
///
/// ```
/// use table_oxide::config::ExtractionConfig;
/// use table_oxide::elements::{Page, Ruling};
/// use table_oxide::geometry::Rect;
/// use table_oxide::pipeline::{ExtractionStrategy, TableExtractor};
///
/// let page = Page::new(1, Rect::new(0.0, 0.0, 200.0, 200.0)).with_rulings(vec![
///     Ruling::horizontal(10.0, 10.0, 110.0),
///     Ruling::horizontal(30.0, 10.0, 110.0),
///     Ruling::vertical(10.0, 10.0, 30.0),
///     Ruling::vertical(110.0, 10.0, 30.0),
/// ]);
///
/// let config = ExtractionConfig::default();
/// let extractor = TableExtractor::new(ExtractionStrategy::Auto, config).unwrap();
/// let tables = extractor.extract(&page);
/// assert_eq!(tables.len(), 1);
/// assert_eq!(tables[0].row_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TableExtractor {
    strategy: ExtractionStrategy,
    ruled: RuledExtractor,
    unruled: UnruledExtractor,
}

impl TableExtractor {
    /// Create an extractor, validating the configuration.
    pub fn new(strategy: ExtractionStrategy, config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            strategy,
            ruled: RuledExtractor::new(config.clone()),
            unruled: UnruledExtractor::new(config),
        })
    }

    /// Create an extractor with default configuration.
    pub fn with_strategy(strategy: ExtractionStrategy) -> Self {
        let config = ExtractionConfig::default();
        Self {
            strategy,
            ruled: RuledExtractor::new(config.clone()),
            unruled: UnruledExtractor::new(config),
        }
    }

    /// The selected strategy.
    pub fn strategy(&self) -> ExtractionStrategy {
        self.strategy
    }

    /// Extract the tables of one page.
    ///
    /// `Ruled` returns one table per cell region in reading order (possibly
    /// none); `Unruled` returns exactly one table, with zero rows when the
    /// page has no text; `Auto` returns the ruled tables, or the unruled
    /// table when there are none.
    pub fn extract(&self, page: &Page) -> Vec<Table> {
        match self.strategy {
            ExtractionStrategy::Ruled => self.ruled.extract(page),
            ExtractionStrategy::Unruled => self.unruled.extract(page),
            ExtractionStrategy::Auto => {
                let tables = self.ruled.extract(page);
                if tables.is_empty() {
                    log::debug!("Page {}: no ruled cells, falling back to unruled", page.number);
                    self.unruled.extract(page)
                } else {
                    tables
                }
            },
        }
    }

    /// Extract the tables inside `area` of a page.
    pub fn extract_area(&self, page: &Page, area: Rect) -> Result<Vec<Table>> {
        Ok(self.extract(&page.area(area)?))
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::with_strategy(ExtractionStrategy::Auto)
    }
}
