//! Integration tests for table writers.
//!
//! Tests the CSV, TSV and JSON writers end-to-end from extracted tables.

use table_oxide::converters::{
    DelimitedWriter, JsonWriter, OutputFormat, TableWriter, WriterRegistry,
};
use table_oxide::elements::{Page, Ruling, Table, TextElement};
use table_oxide::error::Error;
use table_oxide::geometry::Rect;
use table_oxide::pipeline::TableExtractor;

/// A 2x2 ruled table whose top row is one merged cell.
fn extracted() -> Vec<Table> {
    let rulings = vec![
        Ruling::horizontal(0.0, 0.0, 100.0),
        Ruling::horizontal(20.0, 0.0, 100.0),
        Ruling::horizontal(40.0, 0.0, 100.0),
        Ruling::vertical(0.0, 0.0, 40.0),
        Ruling::vertical(50.0, 20.0, 40.0),
        Ruling::vertical(100.0, 0.0, 40.0),
    ];
    let text = vec![
        TextElement::from_top_left(5.0, 40.0, 6.0, 10.0, "H", 10.0),
        TextElement::from_top_left(25.0, 10.0, 6.0, 10.0, "1", 10.0),
        TextElement::from_top_left(25.0, 60.0, 30.0, 10.0, "a,b", 10.0),
    ];
    let page = Page::new(1, Rect::new(0.0, 0.0, 200.0, 200.0))
        .with_rulings(rulings)
        .with_text(text);
    TableExtractor::default().extract(&page)
}

// =============================================================================
// DELIMITED WRITER TESTS
// =============================================================================

mod delimited_tests {
    use super::*;

    #[test]
    fn test_csv_from_extracted_table() {
        let registry = WriterRegistry::with_defaults();
        let csv = registry.write_to_string(OutputFormat::Csv, &extracted()).unwrap();
        assert_eq!(csv, "H,\n1,\"a,b\"\n");
    }

    #[test]
    fn test_tsv_from_extracted_table() {
        let registry = WriterRegistry::with_defaults();
        let tsv = registry.write_to_string(OutputFormat::Tsv, &extracted()).unwrap();
        assert_eq!(tsv, "H\t\n1\ta,b\n");
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(DelimitedWriter::csv().delimiter(), b',');
        assert_eq!(DelimitedWriter::tsv().delimiter(), b'\t');
    }
}

// =============================================================================
// JSON WRITER TESTS
// =============================================================================

mod json_tests {
    use super::*;

    #[test]
    fn test_json_carries_geometry_and_spans() {
        let mut buf = Vec::new();
        JsonWriter::default().write(&extracted(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        let table = &value[0];
        assert_eq!(table["extractionMethod"], "ruled");
        assert_eq!(table["boundingRectangle"]["width"], 100.0);
        assert_eq!(table["rows"][0][0]["text"], "H");
        assert_eq!(table["rows"][0][0]["colSpan"], 2);
        assert_eq!(table["rows"][0][1]["placeholder"], true);
        assert_eq!(table["rows"][1][1]["text"], "a,b");
    }

    #[test]
    fn test_json_is_stable_across_runs() {
        let registry = WriterRegistry::with_defaults();
        let first = registry.write_to_string(OutputFormat::Json, &extracted()).unwrap();
        let second = registry.write_to_string(OutputFormat::Json, &extracted()).unwrap();
        assert_eq!(first, second);
    }
}

// =============================================================================
// REGISTRY TESTS
// =============================================================================

mod registry_tests {
    use super::*;

    #[test]
    fn test_format_tokens() {
        for format in [OutputFormat::Csv, OutputFormat::Tsv, OutputFormat::Json] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
        assert!(matches!("pdf".parse::<OutputFormat>(), Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_registries_are_independent() {
        let mut custom = WriterRegistry::new();
        custom.register(OutputFormat::Json, JsonWriter::pretty());
        assert_eq!(custom.formats(), vec![OutputFormat::Json]);
        assert!(custom.get(OutputFormat::Csv).is_err());

        let defaults = WriterRegistry::with_defaults();
        assert!(defaults.get(OutputFormat::Csv).is_ok());
        let pretty = custom.write_to_string(OutputFormat::Json, &extracted()).unwrap();
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn test_write_to_failing_sink() {
        struct Closed;
        impl std::io::Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let registry = WriterRegistry::with_defaults();
        for format in registry.formats() {
            assert!(registry.write(format, &extracted(), &mut Closed).is_err());
        }
    }
}
