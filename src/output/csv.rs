//! CSV export

use std::io::Write;

use anyhow::{Context, Result};

use crate::model::{Table, TableKind};

use super::Encoder;

/// CSV encoder: header row from the columns, one line per record
pub struct CsvOutput;

impl CsvOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for CsvOutput {
    fn encode(&self, table: &Table, _kind: TableKind, writer: &mut dyn Write) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(table.column_names())
            .context("Failed to write CSV header")?;

        for record in table.to_records() {
            csv_writer
                .write_record(record.values().map(|value| value.display().into_owned()))
                .context("Failed to write CSV row")?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
