//! XLSX export

use std::io::Write;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::model::{CellValue, Table, TableKind};

use super::Encoder;

/// XLSX encoder: one sheet named after the table kind, bold header row
pub struct XlsxOutput;

impl XlsxOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for XlsxOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for XlsxOutput {
    fn encode(&self, table: &Table, kind: TableKind, writer: &mut dyn Write) -> Result<()> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(kind.sheet_name())
            .context("Failed to name worksheet")?;

        for column in &table.columns {
            let col = u16::try_from(column.index).context("Too many columns for a worksheet")?;
            worksheet.write_string_with_format(0, col, column.name.as_str(), &header)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let excel_row = u32::try_from(row_idx + 1).context("Too many rows for a worksheet")?;

            for column in &table.columns {
                let col = u16::try_from(column.index).context("Too many columns for a worksheet")?;
                match row.get(column.index) {
                    None | Some(CellValue::Null) => {}
                    Some(CellValue::Bool(b)) => {
                        worksheet.write_boolean(excel_row, col, *b)?;
                    }
                    Some(CellValue::Int(i)) => {
                        worksheet.write_number(excel_row, col, *i as f64)?;
                    }
                    Some(CellValue::Float(f)) => {
                        worksheet.write_number(excel_row, col, *f)?;
                    }
                    Some(CellValue::String(s)) => {
                        worksheet.write_string(excel_row, col, s.as_ref())?;
                    }
                }
            }
        }

        let buffer = workbook
            .save_to_buffer()
            .context("Failed to build workbook")?;
        writer.write_all(&buffer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::parser::{ExcelParser, Parser};

    fn inventory() -> Table {
        let mut table = Table::new(vec![
            Column::new("name", 0),
            Column::new("hostname", 1),
            Column::new("port", 2),
            Column::new("managed", 3),
        ]);
        table.add_row(
            vec!["r1".into(), "10.0.0.1".into(), 22i64.into(), true.into()],
            2,
        );
        table.add_row(
            vec!["r2".into(), CellValue::Null, 830i64.into(), false.into()],
            3,
        );
        table.add_row(
            vec!["r3".into(), "10.0.0.3".into(), CellValue::Null, true.into()],
            4,
        );
        table
    }

    #[test]
    fn test_read_back_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.xlsx");

        let mut buffer = Vec::new();
        XlsxOutput::new()
            .encode(&inventory(), TableKind::Inventory, &mut buffer)
            .unwrap();
        std::fs::write(&path, &buffer).unwrap();

        let table = ExcelParser.parse(&path, TableKind::Inventory).unwrap();
        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["name", "hostname", "port", "managed"]);
        assert_eq!(table.to_records(), inventory().to_records());
    }

    #[test]
    fn test_sheet_is_named_after_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.xlsx");

        let mut buffer = Vec::new();
        XlsxOutput::new()
            .encode(&inventory(), TableKind::Groups, &mut buffer)
            .unwrap();
        std::fs::write(&path, &buffer).unwrap();

        assert!(ExcelParser.parse(&path, TableKind::Groups).is_ok());
        assert!(ExcelParser.parse(&path, TableKind::Inventory).is_err());
    }
}
