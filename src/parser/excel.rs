//! Excel workbook parser

use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::config::SourceType;
use crate::model::{header_columns, CellValue, Table, TableKind};

use super::Parser;

/// Parser for xlsx workbooks; reads the sheet named after the table kind
pub struct ExcelParser;

impl Parser for ExcelParser {
    fn parse(&self, path: &Path, kind: TableKind) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

        let sheet_name = kind.sheet_name();
        let range: Range<Data> = workbook.worksheet_range(sheet_name).with_context(|| {
            format!("Failed to read sheet '{}' from {}", sheet_name, path.display())
        })?;

        Ok(parse_range(&range))
    }

    fn supports(&self, source_type: SourceType) -> bool {
        source_type == SourceType::Xlsx
    }
}

fn parse_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();

    // First row is header; an empty sheet has no columns and no records
    let Some(header_row) = rows.next() else {
        return Table::default();
    };

    let columns = header_columns(header_row.iter().enumerate().map(|(i, cell)| {
        let name = cell_to_string(cell);
        if name.is_empty() {
            format!("Column{}", i + 1)
        } else {
            name
        }
    }));

    let mut table = Table::new(columns);

    for (line_num, row) in rows.enumerate() {
        let cells: Vec<CellValue> = row
            .iter()
            .take(table.column_count())
            .map(convert_cell)
            .collect();

        table.add_row(cells, line_num + 2); // +2 for 1-indexing and header
    }

    table
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{:?}", e),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Null
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        Data::Float(f) => {
            // Excel stores every number as a float
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                CellValue::Int(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::String(Cow::Owned(format!("{}", dt))),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(Cow::Owned(s.clone())),
        Data::Error(e) => CellValue::String(Cow::Owned(format!("#{:?}", e))),
    }
}
