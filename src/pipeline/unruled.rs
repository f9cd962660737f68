//! Unruled tables: columns and rows inferred from text layout.

use crate::config::ExtractionConfig;
use crate::elements::{ExtractionMethod, Page, Ruling, Table};
use crate::geometry::Rect;
use crate::layout::{
    assign_unruled, column_separators, group_lines, merge_words, normalize_rulings, row_separators,
};
use crate::pipeline::ExtractionAlgorithm;

/// Words → lines → projection separators → one table for the page.
#[derive(Debug, Clone, Default)]
pub struct UnruledExtractor {
    config: ExtractionConfig,
}

impl UnruledExtractor {
    /// Create an unruled extractor.
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }
}

impl ExtractionAlgorithm for UnruledExtractor {
    fn extract(&self, page: &Page) -> Vec<Table> {
        let area = page.bounds.is_finite().then_some(&page.bounds);
        let rulings = normalize_rulings(&page.rulings, area, &self.config.rulings);

        // Caller-supplied columns split words like real vertical rulings do
        let mut boundaries = rulings.vertical.clone();
        if let Some(positions) = &self.config.projection.column_positions {
            boundaries.extend(
                positions
                    .iter()
                    .map(|&x| Ruling::vertical(x, page.bounds.top(), page.bounds.bottom())),
            );
        }

        let text = page.visible_text();
        let runs = merge_words(&text, &boundaries, &self.config.text);
        let lines = group_lines(&runs, &self.config.text);
        let Some(bounds) = Rect::bounding_box(lines.iter().map(|l| &l.bbox)) else {
            log::debug!("Page {}: no text, empty unruled table", page.number);
            return vec![Table::new(page.number, ExtractionMethod::Unruled, page.bounds)];
        };

        let projection = &self.config.projection;
        let columns = column_separators(&lines, &bounds, &rulings.vertical, projection);
        let rows = row_separators(&lines, &bounds, &rulings.horizontal, projection);
        vec![assign_unruled(page.number, bounds, &lines, &columns, &rows)]
    }

    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Unruled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::TextElement;

    fn word(s: &str, left: f32, top: f32) -> Vec<TextElement> {
        s.chars()
            .enumerate()
            .map(|(i, c)| {
                TextElement::from_top_left(top, left + i as f32 * 5.0, 5.0, 10.0, c, 10.0)
            })
            .collect()
    }

    #[test]
    fn test_empty_page_gives_one_empty_table() {
        let page = Page::new(2, Rect::new(0.0, 0.0, 100.0, 100.0));
        let tables = UnruledExtractor::default().extract(&page);
        assert_eq!(tables.len(), 1);
        assert!(tables[0].is_empty());
        assert_eq!(tables[0].page_number, 2);
        assert_eq!(tables[0].bbox, page.bounds);
    }

    #[test]
    fn test_lines_without_leading_stay_apart() {
        let mut glyphs = word("id", 10.0, 10.0);
        glyphs.extend(word("name", 60.0, 10.0));
        glyphs.extend(word("1", 10.0, 20.0));
        glyphs.extend(word("bolt", 60.0, 20.0));
        let page = Page::new(1, Rect::new(0.0, 0.0, 600.0, 300.0)).with_text(glyphs);

        let tables = UnruledExtractor::default().extract(&page);
        assert_eq!(tables[0].text_grid(), vec![vec!["id", "name"], vec!["1", "bolt"]]);
    }

    #[test]
    fn test_far_off_page_glyph_is_ignored() {
        let mut glyphs = word("a", 10.0, 10.0);
        glyphs.extend(word("b", 60.0, 10.0));
        glyphs.extend(word("x", 4.0e9, 10.0));
        let page = Page::new(1, Rect::new(0.0, 0.0, 600.0, 300.0)).with_text(glyphs);

        let tables = UnruledExtractor::default().extract(&page);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].text_grid(), vec![vec!["a", "b"]]);
        assert_eq!(tables[0].bbox, Rect::from_points(10.0, 10.0, 65.0, 20.0));
    }

    #[test]
    fn test_column_positions_split_adjacent_words() {
        // "ab" and "cd" touch, so they would merge without the column boundary
        let mut glyphs = word("ab", 0.0, 0.0);
        glyphs.extend(word("cd", 10.0, 0.0));
        let page = Page::new(1, Rect::new(0.0, 0.0, 100.0, 100.0)).with_text(glyphs);

        let merged = UnruledExtractor::default().extract(&page);
        assert_eq!(merged[0].text_grid(), vec![vec!["abcd"]]);

        let config = ExtractionConfig::default().with_column_positions(vec![10.0]);
        let split = UnruledExtractor::new(config).extract(&page);
        assert_eq!(split[0].text_grid(), vec![vec!["ab", "cd"]]);
    }
}
