//! JSON export

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::model::{Table, TableKind};

use super::Encoder;

/// JSON encoder: an array of objects, fields in column order
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for JsonOutput {
    fn encode(&self, table: &Table, _kind: TableKind, writer: &mut dyn Write) -> Result<()> {
        let records = table.to_records();

        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
        records
            .serialize(&mut serializer)
            .context("Failed to serialize records")?;
        writeln!(writer)?;

        Ok(())
    }
}
