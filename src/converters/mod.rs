//! Output writers for extracted tables.
//!
//! Writers are plain formatting layers over [`Table`] values: they never
//! change what was extracted. There is no process-wide writer table; callers
//! own a [`WriterRegistry`] and look writers up in it.
//!
//! # Examples
//!
//! ```
//! use table_oxide::converters::{OutputFormat, WriterRegistry};
//! use table_oxide::elements::{ExtractionMethod, Table, TableCell};
//! use table_oxide::geometry::Rect;
//!
//! let mut table = Table::new(1, ExtractionMethod::Unruled, Rect::new(0.0, 0.0, 20.0, 10.0));
//! table.add_row(vec![
//!     TableCell::new(Rect::new(0.0, 0.0, 10.0, 10.0), "a"),
//!     TableCell::new(Rect::new(10.0, 0.0, 10.0, 10.0), "b,c"),
//! ]);
//!
//! let registry = WriterRegistry::with_defaults();
//! let csv = registry.write_to_string(OutputFormat::Csv, &[table]).unwrap();
//! assert_eq!(csv, "a,\"b,c\"\n");
//! ```

mod csv;
mod json;

pub use self::csv::DelimitedWriter;
pub use self::json::JsonWriter;

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::elements::Table;
use crate::error::{Error, Result};

/// Output format token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputFormat {
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
    /// JSON array of tables
    Json,
}

impl OutputFormat {
    /// Lowercase name, also the usual file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Serializes tables to a byte sink.
pub trait TableWriter: Send + Sync {
    /// Write all tables to `out`.
    fn write(&self, tables: &[Table], out: &mut dyn Write) -> Result<()>;
}

/// Caller-owned mapping from format to writer.
#[derive(Default)]
pub struct WriterRegistry {
    writers: BTreeMap<OutputFormat, Box<dyn TableWriter>>,
}

impl fmt::Debug for WriterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterRegistry")
            .field("formats", &self.writers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl WriterRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the CSV, TSV and JSON writers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(OutputFormat::Csv, DelimitedWriter::csv());
        registry.register(OutputFormat::Tsv, DelimitedWriter::tsv());
        registry.register(OutputFormat::Json, JsonWriter::default());
        registry
    }

    /// Add or replace the writer for `format`.
    pub fn register(&mut self, format: OutputFormat, writer: impl TableWriter + 'static) {
        self.writers.insert(format, Box::new(writer));
    }

    /// Registered formats, in a stable order.
    pub fn formats(&self) -> Vec<OutputFormat> {
        self.writers.keys().copied().collect()
    }

    /// Look up the writer for `format`.
    pub fn get(&self, format: OutputFormat) -> Result<&dyn TableWriter> {
        self.writers
            .get(&format)
            .map(|w| w.as_ref())
            .ok_or_else(|| Error::UnsupportedFormat(format.to_string()))
    }

    /// Write tables in `format` to `out`.
    pub fn write(&self, format: OutputFormat, tables: &[Table], out: &mut dyn Write) -> Result<()> {
        self.get(format)?.write(tables, out)
    }

    /// Write tables in `format` to a string.
    pub fn write_to_string(&self, format: OutputFormat, tables: &[Table]) -> Result<String> {
        let mut buf = Vec::new();
        self.write(format, tables, &mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("tsv".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "xlsx".parse::<OutputFormat>(),
            Err(Error::UnsupportedFormat(f)) if f == "xlsx"
        ));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = WriterRegistry::with_defaults();
        assert_eq!(
            registry.formats(),
            vec![OutputFormat::Csv, OutputFormat::Tsv, OutputFormat::Json]
        );

        let empty = WriterRegistry::new();
        assert!(matches!(empty.get(OutputFormat::Json), Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_registry_replacement() {
        struct Fixed;
        impl TableWriter for Fixed {
            fn write(&self, _tables: &[Table], out: &mut dyn Write) -> Result<()> {
                out.write_all(b"fixed")?;
                Ok(())
            }
        }

        let mut registry = WriterRegistry::with_defaults();
        registry.register(OutputFormat::Csv, Fixed);
        assert_eq!(registry.write_to_string(OutputFormat::Csv, &[]).unwrap(), "fixed");
    }
}
