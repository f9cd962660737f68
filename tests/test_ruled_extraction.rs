//! Integration tests for the ruled extraction path.
//!
//! Pages are built directly from rulings and glyph boxes, the way a page
//! decoder would hand them over.

use table_oxide::config::ExtractionConfig;
use table_oxide::elements::{ExtractionMethod, Page, Ruling, TextElement};
use table_oxide::geometry::Rect;
use table_oxide::layout::merge_regions;
use table_oxide::pipeline::{ExtractionStrategy, RuledExtractor, TableExtractor};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Glyphs of one word, laid out left to right without gaps.
fn word(text: &str, left: f32, top: f32, size: f32) -> Vec<TextElement> {
    let width = size * 0.6;
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            TextElement::from_top_left(top, left + i as f32 * width, width, size, c, size)
        })
        .collect()
}

/// Horizontal and vertical rulings of a full grid.
fn grid(xs: &[f32], ys: &[f32]) -> Vec<Ruling> {
    let (left, right) = (xs[0], xs[xs.len() - 1]);
    let (top, bottom) = (ys[0], ys[ys.len() - 1]);
    let mut rulings: Vec<Ruling> = ys.iter().map(|&y| Ruling::horizontal(y, left, right)).collect();
    rulings.extend(xs.iter().map(|&x| Ruling::vertical(x, top, bottom)));
    rulings
}

fn steps(start: f32, step: f32, count: usize) -> Vec<f32> {
    (0..=count).map(|i| start + i as f32 * step).collect()
}

// ============================================================================
// Two-column fixture with a full-width header
// ============================================================================

mod header_fixture_tests {
    use super::*;

    fn fixture_page() -> Page {
        let mut rulings: Vec<Ruling> = [40.0, 44.0, 50.0, 54.0, 60.0, 64.0, 70.0, 74.0, 80.0]
            .iter()
            .map(|&y| Ruling::from_top_left(y, 18.0, 208.0, 0.0))
            .collect();
        rulings.push(Ruling::from_top_left(40.0, 18.0, 0.0, 40.0));
        rulings.push(Ruling::from_top_left(44.0, 70.0, 0.0, 36.0));
        rulings.push(Ruling::from_top_left(40.0, 226.0, 0.0, 40.0));

        let mut text = word("Title", 100.0, 40.5, 3.0);
        text.extend(word("Name", 22.0, 45.0, 4.0));
        text.extend(word("Value", 80.0, 45.0, 4.0));
        text.extend(word("x", 22.0, 75.0, 4.0));

        Page::new(1, Rect::new(0.0, 0.0, 612.0, 792.0))
            .with_rulings(rulings)
            .with_text(text)
    }

    #[test]
    fn test_fifteen_cells_in_one_table() {
        init();
        let page = fixture_page();
        let regions = RuledExtractor::default().find_regions(&page);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].cells.len(), 15);
        assert_eq!(regions[0].bbox, Rect::from_top_left(40.0, 18.0, 208.0, 40.0));
        assert_eq!(regions[0].cells[0], Rect::from_top_left(40.0, 18.0, 208.0, 4.0));
        assert_eq!(regions[0].cells[1], Rect::from_top_left(44.0, 18.0, 52.0, 6.0));
        assert_eq!(regions[0].cells[14], Rect::from_top_left(74.0, 70.0, 156.0, 6.0));
    }

    #[test]
    fn test_header_spans_both_columns() {
        init();
        let tables = TableExtractor::default().extract(&fixture_page());
        assert_eq!(tables.len(), 1);

        let table = &tables[0];
        assert_eq!(table.extraction_method, ExtractionMethod::Ruled);
        assert_eq!(table.row_count(), 8);
        assert!(table.rows.iter().all(|row| row.len() == 2));

        let header = table.cell(0, 0).unwrap();
        assert_eq!(header.text, "Title");
        assert_eq!(header.col_span, 2);
        assert_eq!(header.row_span, 1);

        let covered = table.cell(0, 1).unwrap();
        assert!(covered.placeholder);
        assert_eq!(covered.bbox.area(), 0.0);
    }

    #[test]
    fn test_text_lands_in_containing_cells() {
        init();
        let table = &TableExtractor::default().extract(&fixture_page())[0];
        let grid = table.text_grid();
        assert_eq!(grid[1], vec!["Name", "Value"]);
        assert_eq!(grid[7], vec!["x", ""]);
        assert!(grid[2..7].iter().flatten().all(String::is_empty));
    }
}

// ============================================================================
// Region separation
// ============================================================================

mod region_tests {
    use super::*;

    /// A 4x4 grid over (40,18,208,40) and an 8x13 grid over (84,18,962,464).
    fn two_grid_page() -> Page {
        let mut rulings = grid(&steps(18.0, 52.0, 4), &steps(40.0, 10.0, 4));
        rulings.extend(grid(&steps(18.0, 74.0, 13), &steps(84.0, 58.0, 8)));
        Page::new(3, Rect::new(0.0, 0.0, 1000.0, 600.0)).with_rulings(rulings)
    }

    #[test]
    fn test_separate_grids_become_separate_tables() {
        init();
        let extractor = TableExtractor::with_strategy(ExtractionStrategy::Ruled);
        let tables = extractor.extract(&two_grid_page());
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].bbox, Rect::from_top_left(40.0, 18.0, 208.0, 40.0));
        assert_eq!(tables[1].bbox, Rect::from_top_left(84.0, 18.0, 962.0, 464.0));
        assert_eq!((tables[0].row_count(), tables[0].column_count()), (4, 4));
        assert_eq!((tables[1].row_count(), tables[1].column_count()), (8, 13));
        assert!(tables.iter().all(|t| t.page_number == 3));
    }

    #[test]
    fn test_merge_regions_over_found_cells() {
        init();
        let regions = RuledExtractor::default().find_regions(&two_grid_page());
        let cells: Vec<Rect> = regions.iter().flat_map(|r| r.cells.iter().copied()).collect();
        assert_eq!(cells.len(), 16 + 104);

        let merged = merge_regions(&cells, &ExtractionConfig::default().regions);
        assert_eq!(merged, vec![
            Rect::from_top_left(40.0, 18.0, 208.0, 40.0),
            Rect::from_top_left(84.0, 18.0, 962.0, 464.0),
        ]);
    }

    #[test]
    fn test_broken_rulings_are_rejoined() {
        init();
        // Every horizontal ruling drawn as two abutting halves
        let mut rulings = Vec::new();
        for y in [0.0, 20.0, 40.0] {
            rulings.push(Ruling::horizontal(y, 0.0, 50.0));
            rulings.push(Ruling::horizontal(y, 50.3, 100.0));
        }
        for x in [0.0, 100.0] {
            rulings.push(Ruling::vertical(x, 0.0, 40.0));
        }
        let page = Page::new(1, Rect::new(0.0, 0.0, 200.0, 200.0)).with_rulings(rulings);

        let tables = TableExtractor::with_strategy(ExtractionStrategy::Ruled).extract(&page);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].row_count(), 2);
        assert_eq!(tables[0].column_count(), 1);
    }
}

// ============================================================================
// Strategy and repeatability
// ============================================================================

mod strategy_tests {
    use super::*;

    fn small_page() -> Page {
        let mut text = word("a", 5.0, 5.0, 10.0);
        text.extend(word("b", 55.0, 5.0, 10.0));
        text.extend(word("c", 5.0, 25.0, 10.0));
        Page::new(2, Rect::new(0.0, 0.0, 300.0, 300.0))
            .with_rulings(grid(&[0.0, 50.0, 100.0], &[0.0, 20.0, 40.0]))
            .with_text(text)
    }

    #[test]
    fn test_auto_prefers_ruled() {
        init();
        let tables = TableExtractor::default().extract(&small_page());
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].extraction_method, ExtractionMethod::Ruled);
        assert_eq!(tables[0].text_grid(), vec![vec!["a", "b"], vec!["c", ""]]);
    }

    #[test]
    fn test_ruled_on_unruled_page_is_empty() {
        init();
        let page = Page::new(1, Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_text(word("alone", 10.0, 10.0, 10.0));
        assert!(TableExtractor::with_strategy(ExtractionStrategy::Ruled)
            .extract(&page)
            .is_empty());
    }

    #[test]
    fn test_extraction_is_repeatable() {
        init();
        let extractor = TableExtractor::default();
        let page = small_page();
        let first = serde_json::to_string(&extractor.extract(&page)).unwrap();
        let second = serde_json::to_string(&extractor.extract(&page)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_area_keeps_one_grid() {
        init();
        let mut rulings = grid(&[0.0, 50.0, 100.0], &[0.0, 20.0, 40.0]);
        rulings.extend(grid(&[0.0, 50.0], &[200.0, 220.0]));
        let page = Page::new(1, Rect::new(0.0, 0.0, 300.0, 300.0)).with_rulings(rulings);
        let extractor = TableExtractor::with_strategy(ExtractionStrategy::Ruled);

        assert_eq!(extractor.extract(&page).len(), 2);
        let cropped = extractor.extract_area(&page, Rect::new(0.0, 150.0, 300.0, 150.0)).unwrap();
        assert_eq!(cropped.len(), 1);
        assert_eq!(cropped[0].bbox, Rect::from_top_left(200.0, 0.0, 50.0, 20.0));
    }

    #[test]
    fn test_invalid_area_is_rejected() {
        init();
        let extractor = TableExtractor::default();
        let area = Rect::new(0.0, 0.0, f32::NAN, 10.0);
        assert!(extractor.extract_area(&small_page(), area).is_err());
    }
}
