//! JSON output.

use std::io::Write;

use crate::converters::TableWriter;
use crate::elements::Table;
use crate::error::Result;

/// Writes tables as one JSON array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    /// Indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl TableWriter for JsonWriter {
    fn write(&self, tables: &[Table], out: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, tables)?;
        } else {
            serde_json::to_writer(&mut *out, tables)?;
        }
        out.flush()?;
        Ok(())
    }
}
