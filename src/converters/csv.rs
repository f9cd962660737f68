//! CSV and TSV output.

use std::io::Write;

use csv::WriterBuilder;

use crate::converters::TableWriter;
use crate::elements::Table;
use crate::error::Result;

/// Delimiter-separated writer: one record per table row, tables written
/// back to back. Placeholder cells are written as empty fields so columns
/// stay aligned under spanning cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedWriter {
    delimiter: u8,
}

impl DelimitedWriter {
    /// Comma-separated writer.
    pub fn csv() -> Self {
        Self { delimiter: b',' }
    }

    /// Tab-separated writer.
    pub fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }

    /// Field delimiter byte.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl TableWriter for DelimitedWriter {
    fn write(&self, tables: &[Table], out: &mut dyn Write) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_writer(out);
        for table in tables {
            for row in &table.rows {
                writer.write_record(row.iter().map(|cell| cell.text.as_str()))?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}
