//! Ruled tables: cells enclosed by ruling lines.

use crate::config::{ExtractionConfig, TextMergeConfig};
use crate::elements::{ExtractionMethod, Page, Table, TextRun};
use crate::layout::{
    assign_ruled, find_cells, group_cells, group_lines, merge_words, normalize_rulings, CellRegion,
};
use crate::pipeline::ExtractionAlgorithm;

/// Ruling grid → cells → regions → one table per region.
#[derive(Debug, Clone, Default)]
pub struct RuledExtractor {
    config: ExtractionConfig,
}

impl RuledExtractor {
    /// Create a ruled extractor.
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Cell regions of a page, in reading order, without assigning text.
    pub fn find_regions(&self, page: &Page) -> Vec<CellRegion> {
        let area = page.bounds.is_finite().then_some(&page.bounds);
        let rulings = normalize_rulings(&page.rulings, area, &self.config.rulings);
        let cells = find_cells(&rulings.horizontal, &rulings.vertical, &self.config.grid);
        group_cells(&cells, &self.config.regions)
    }
}

impl ExtractionAlgorithm for RuledExtractor {
    fn extract(&self, page: &Page) -> Vec<Table> {
        let area = page.bounds.is_finite().then_some(&page.bounds);
        let rulings = normalize_rulings(&page.rulings, area, &self.config.rulings);
        let cells = find_cells(&rulings.horizontal, &rulings.vertical, &self.config.grid);
        let regions = group_cells(&cells, &self.config.regions);
        if regions.is_empty() {
            return Vec::new();
        }

        // Runs reach the cells line by line, left to right within a line
        let text = page.visible_text();
        let runs = merge_words(&text, &rulings.vertical, &self.config.text);
        let line_config = TextMergeConfig {
            drop_ruler_lines: false,
            ..self.config.text.clone()
        };
        let runs: Vec<TextRun> = group_lines(&runs, &line_config)
            .into_iter()
            .flat_map(|line| line.runs)
            .collect();

        let tables: Vec<Table> = regions
            .iter()
            .map(|region| assign_ruled(page.number, region, &runs, &self.config.grid))
            .collect();
        log::debug!("Page {}: {} ruled tables", page.number, tables.len());
        tables
    }

    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Ruled
    }
}
