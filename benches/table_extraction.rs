//! Table extraction benchmarks
//!
//! Measures cell finding on ruled grids of growing size and the full
//! ruled and unruled paths on synthetic pages.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use table_oxide::config::GridConfig;
use table_oxide::document::{extract_document, InMemorySource};
use table_oxide::elements::{Page, Ruling, TextElement};
use table_oxide::geometry::Rect;
use table_oxide::layout::find_cells;
use table_oxide::pipeline::{ExtractionStrategy, TableExtractor};

const CELL_WIDTH: f32 = 60.0;
const CELL_HEIGHT: f32 = 16.0;

/// Rulings of a `rows` x `cols` grid anchored at (20, 20)
fn grid_rulings(rows: usize, cols: usize) -> (Vec<Ruling>, Vec<Ruling>) {
    let right = 20.0 + cols as f32 * CELL_WIDTH;
    let bottom = 20.0 + rows as f32 * CELL_HEIGHT;
    let horizontal = (0..=rows)
        .map(|r| Ruling::horizontal(20.0 + r as f32 * CELL_HEIGHT, 20.0, right))
        .collect();
    let vertical = (0..=cols)
        .map(|c| Ruling::vertical(20.0 + c as f32 * CELL_WIDTH, 20.0, bottom))
        .collect();
    (horizontal, vertical)
}

/// One short word per grid position
fn grid_text(rows: usize, cols: usize) -> Vec<TextElement> {
    let mut text = Vec::with_capacity(rows * cols * 4);
    for r in 0..rows {
        for c in 0..cols {
            let top = 23.0 + r as f32 * CELL_HEIGHT;
            let left = 24.0 + c as f32 * CELL_WIDTH;
            for (i, ch) in format!("{:04}", r * cols + c).chars().enumerate() {
                let left = left + i as f32 * 6.0;
                text.push(TextElement::from_top_left(top, left, 6.0, 10.0, ch, 10.0));
            }
        }
    }
    text
}

fn ruled_page(rows: usize, cols: usize) -> Page {
    let (mut rulings, vertical) = grid_rulings(rows, cols);
    rulings.extend(vertical);
    Page::new(1, Rect::new(0.0, 0.0, 2000.0, 2000.0))
        .with_rulings(rulings)
        .with_text(grid_text(rows, cols))
}

fn unruled_page(rows: usize, cols: usize) -> Page {
    Page::new(1, Rect::new(0.0, 0.0, 2000.0, 2000.0)).with_text(grid_text(rows, cols))
}

/// Benchmark cell finding with different grid sizes
fn bench_find_cells(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_cells");
    let config = GridConfig::default();

    for size in [5, 20, 50] {
        let (horizontal, vertical) = grid_rulings(size, size);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{size}x{size}")),
            &(horizontal, vertical),
            |b, (horizontal, vertical)| {
                b.iter(|| {
                    black_box(find_cells(black_box(horizontal), black_box(vertical), &config))
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the full ruled and unruled paths on one page
fn bench_extract_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_page");

    for (rows, cols) in [(10, 5), (40, 8)] {
        let ruled = ruled_page(rows, cols);
        let extractor = TableExtractor::with_strategy(ExtractionStrategy::Ruled);
        let id = BenchmarkId::new("ruled", format!("{rows}x{cols}"));
        group.bench_with_input(id, &ruled, |b, page| {
            b.iter(|| black_box(extractor.extract(black_box(page))));
        });

        let unruled = unruled_page(rows, cols);
        let extractor = TableExtractor::with_strategy(ExtractionStrategy::Unruled);
        let id = BenchmarkId::new("unruled", format!("{rows}x{cols}"));
        group.bench_with_input(id, &unruled, |b, page| {
            b.iter(|| black_box(extractor.extract(black_box(page))));
        });
    }

    group.finish();
}

/// Benchmark page fan-out over a multi-page document
fn bench_extract_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_document");
    group.sample_size(20);

    let pages: Vec<Page> = (1..=32)
        .map(|n| {
            let mut page = ruled_page(20, 6);
            page.number = n;
            page
        })
        .collect();
    let extractor = TableExtractor::default();

    group.bench_function("32_pages", |b| {
        b.iter(|| {
            let mut source = InMemorySource::new(pages.clone());
            black_box(extract_document(&mut source, &extractor).unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_find_cells, bench_extract_page, bench_extract_document);
criterion_main!(benches);
