//! Text-run merger: glyphs into words, words into lines.
//!
//! Glyphs are first bucketed into baseline groups, then swept left to right.
//! Two neighbouring glyphs join the same run when the gap between them is at
//! most `word_gap_ratio` times the font size and no vertical ruling passes
//! between them. Gaps wider than `space_ratio` times the run's average
//! character width get a synthetic space, so a run is a word or a phrase.

use std::cmp::Ordering;

use crate::config::TextMergeConfig;
use crate::elements::{Ruling, TextElement, TextLine, TextRun};
use crate::geometry::Rect;

/// Lines whose width is at least this share of the text width can be rulers.
const RULER_WIDTH_RATIO: f32 = 0.9;

fn top_left_order(a: &Rect, b: &Rect) -> Ordering {
    a.top()
        .total_cmp(&b.top())
        .then(a.left().total_cmp(&b.left()))
}

fn left_top_order(a: &Rect, b: &Rect) -> Ordering {
    a.left()
        .total_cmp(&b.left())
        .then(a.top().total_cmp(&b.top()))
}

/// Glyphs sharing a baseline, before the left-to-right sweep.
struct BaselineGroup {
    baseline: f32,
    font_size: f32,
    bbox: Rect,
    elements: Vec<TextElement>,
}

impl BaselineGroup {
    fn accepts(&self, element: &TextElement, config: &TextMergeConfig) -> bool {
        let font_size = self.font_size.max(element.effective_font_size());
        (element.bbox.bottom() - self.baseline).abs() <= config.baseline_tolerance_ratio * font_size
            && self.bbox.vertical_overlap(&element.bbox) > 0.0
    }
}

/// Check if a vertical ruling passes between the centers of `a` and `b`.
fn separated_by_ruling(a: &Rect, b: &Rect, vertical_rulings: &[Ruling]) -> bool {
    let (from, to) = (a.center().x, b.center().x);
    let y = (a.center().y + b.center().y) / 2.0;
    vertical_rulings.iter().any(|r| {
        r.is_vertical()
            && r.position() > from
            && r.position() < to
            && r.start() <= y
            && r.end() >= y
    })
}

/// Merge text elements into runs.
///
/// Whitespace-only and non-finite elements are skipped; spaces are
/// re-inferred from gaps. Same-text glyphs that overlap their predecessor by
/// more than `duplicate_overlap_ratio` are dropped as double renderings.
/// Runs are returned top-to-bottom, left-to-right.
///
/// # Arguments
///
/// * `elements` - Glyphs in any order
/// * `vertical_rulings` - Rulings acting as hard column boundaries
/// * `config` - Gap and overlap thresholds
///
/// # Examples
///
/// ```
/// use table_oxide::config::TextMergeConfig;
/// use table_oxide::elements::{Ruling, TextElement};
/// use table_oxide::layout::merge_words;
///
/// let glyphs: Vec<TextElement> = "ab"
///     .chars()
///     .enumerate()
///     .map(|(i, c)| TextElement::from_top_left(0.0, i as f32 * 5.0, 5.0, 10.0, c, 10.0))
///     .collect();
///
/// let runs = merge_words(&glyphs, &[], &TextMergeConfig::default());
/// assert_eq!(runs.len(), 1);
/// assert_eq!(runs[0].text, "ab");
///
/// let boundary = [Ruling::vertical(5.0, 0.0, 10.0)];
/// let split = merge_words(&glyphs, &boundary, &TextMergeConfig::default());
/// assert_eq!(split.len(), 2);
/// ```
pub fn merge_words(
    elements: &[TextElement],
    vertical_rulings: &[Ruling],
    config: &TextMergeConfig,
) -> Vec<TextRun> {
    let mut glyphs: Vec<TextElement> = elements
        .iter()
        .filter(|e| !e.is_whitespace() && e.bbox.is_finite())
        .cloned()
        .collect();
    glyphs.sort_by(|a, b| top_left_order(&a.bbox, &b.bbox));

    let mut groups: Vec<BaselineGroup> = Vec::new();
    for glyph in glyphs {
        match groups.iter_mut().rev().find(|g| g.accepts(&glyph, config)) {
            Some(group) => {
                group.bbox = group.bbox.union(&glyph.bbox);
                group.font_size = group.font_size.max(glyph.effective_font_size());
                group.elements.push(glyph);
            },
            None => groups.push(BaselineGroup {
                baseline: glyph.bbox.bottom(),
                font_size: glyph.effective_font_size(),
                bbox: glyph.bbox,
                elements: vec![glyph],
            }),
        }
    }

    let mut runs = Vec::new();
    for mut group in groups {
        group.elements.sort_by(|a, b| left_top_order(&a.bbox, &b.bbox));
        let mut elements = group.elements.into_iter();
        let Some(first) = elements.next() else {
            continue;
        };
        let mut run = TextRun::from_element(first);

        for element in elements {
            let Some(last) = run.last_element() else {
                continue;
            };

            let overlap = last.bbox.overlap_ratio(&element.bbox);
            if last.text == element.text && overlap > config.duplicate_overlap_ratio {
                log::trace!("Dropping duplicate glyph {:?} at {:?}", element.text, element.bbox);
                continue;
            }

            let gap = element.bbox.left() - last.bbox.right();
            let font_size = last.effective_font_size().max(element.effective_font_size());
            let adjacent = gap <= config.word_gap_ratio * font_size;

            if adjacent && !separated_by_ruling(&last.bbox, &element.bbox, vertical_rulings) {
                if gap > config.space_ratio * run.average_char_width() && !run.text.ends_with(' ') {
                    run.push_space();
                }
                run.push(element);
            } else {
                log::trace!("Run break before {:?} (gap {:.2})", element.text, gap);
                runs.push(run);
                run = TextRun::from_element(element);
            }
        }
        runs.push(run);
    }

    runs.sort_by(|a, b| top_left_order(&a.bbox, &b.bbox));
    log::debug!("Merged {} text elements into {} runs", elements.len(), runs.len());
    runs
}

/// Group runs into lines by vertical overlap.
///
/// A run joins the current line when its vertical overlap with the line is
/// at least `line_overlap_ratio` of the shorter height. Runs within a line
/// are sorted left to right. With `drop_ruler_lines`, lines made only of one
/// repeated non-alphanumeric character (`-----`, `=====`) and spanning most
/// of the text width are removed.
pub fn group_lines(runs: &[TextRun], config: &TextMergeConfig) -> Vec<TextLine> {
    let mut sorted: Vec<TextRun> = runs.iter().filter(|r| !r.is_blank()).cloned().collect();
    sorted.sort_by(|a, b| top_left_order(&a.bbox, &b.bbox));

    let mut lines: Vec<TextLine> = Vec::new();
    for run in sorted {
        let joins = lines.last().is_some_and(|line| {
            line.bbox.vertical_overlap(&run.bbox) > 0.0
                && line.bbox.vertical_overlap_ratio(&run.bbox) >= config.line_overlap_ratio
        });
        if let Some(line) = lines.last_mut().filter(|_| joins) {
            line.push(run);
        } else {
            lines.push(TextLine::from_run(run));
        }
    }
    for line in &mut lines {
        line.runs.sort_by(|a, b| left_top_order(&a.bbox, &b.bbox));
    }

    if config.drop_ruler_lines {
        if let Some(bounds) = Rect::bounding_box(lines.iter().map(|l| &l.bbox)) {
            let before = lines.len();
            lines.retain(|line| !is_ruler_line(line, bounds.width));
            if lines.len() < before {
                log::debug!("Dropped {} ruler lines", before - lines.len());
            }
        }
    }

    lines
}

fn is_ruler_line(line: &TextLine, text_width: f32) -> bool {
    let mut chars = line.runs.iter().map(TextRun::repeated_char);
    let Some(Some(symbol)) = chars.next() else {
        return false;
    };
    !symbol.is_alphanumeric()
        && chars.all(|c| c == Some(symbol))
        && line.bbox.width >= RULER_WIDTH_RATIO * text_width
}
