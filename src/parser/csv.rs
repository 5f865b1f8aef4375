//! CSV file parser

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::SourceType;
use crate::model::{header_columns, CellValue, Table, TableKind};

use super::Parser;

/// Parser for CSV files
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path, _kind: TableKind) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        // Read headers
        let headers = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();

        let mut table = Table::new(header_columns(headers.iter().map(str::trim)));

        for (line_num, result) in csv_reader.records().enumerate() {
            let record = result.with_context(|| format!("Failed to read CSV row {}", line_num + 2))?; // +2 for 1-indexing and header

            let cells: Vec<CellValue> = record
                .iter()
                .take(table.column_count())
                .map(parse_cell_value)
                .collect();

            table.add_row(cells, line_num + 2);
        }

        Ok(table)
    }

    fn supports(&self, source_type: SourceType) -> bool {
        source_type == SourceType::Csv
    }
}

/// Parse a string value into a CellValue with type inference
fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    // Check for empty/null
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed == "NA"
        || trimmed == "NaN"
    {
        return CellValue::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    // Only plain decimal notation; "inf" and friends stay strings
    if trimmed.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }
    }

    CellValue::String(Cow::Owned(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_cell_value() {
        assert_eq!(parse_cell_value(""), CellValue::Null);
        assert_eq!(parse_cell_value("null"), CellValue::Null);
        assert_eq!(parse_cell_value("NaN"), CellValue::Null);
        assert_eq!(parse_cell_value("TRUE"), CellValue::Bool(true));
        assert_eq!(parse_cell_value("false"), CellValue::Bool(false));
        assert_eq!(parse_cell_value("22"), CellValue::Int(22));
        assert_eq!(parse_cell_value("3.5"), CellValue::Float(3.5));
        assert_eq!(parse_cell_value("inf"), CellValue::from("inf"));
        assert_eq!(parse_cell_value("10.0.0.1"), CellValue::from("10.0.0.1"));
        assert_eq!(parse_cell_value(" ios "), CellValue::from("ios"));
    }

    #[test]
    fn test_parse_file_keeps_row_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,hostname,port").unwrap();
        writeln!(file, "r1,10.0.0.1,22").unwrap();
        writeln!(file, "r2,10.0.0.2").unwrap();
        writeln!(file, "r1,10.0.0.3,830").unwrap();

        let table = CsvParser.parse(file.path(), TableKind::Inventory).unwrap();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 3);

        let records = table.to_records();
        assert_eq!(records[0]["name"], CellValue::from("r1"));
        assert_eq!(records[1]["port"], CellValue::Null);
        assert_eq!(records[2]["port"], CellValue::Int(830));
        assert_eq!(table.rows[2].source_line, 4);
    }

    #[test]
    fn test_repeated_headers_keep_every_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,hostname,name").unwrap();
        writeln!(file, "r1,10.0.0.1,x").unwrap();

        let table = CsvParser.parse(file.path(), TableKind::Inventory).unwrap();
        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["name", "hostname", "name.1"]);

        let records = table.to_records();
        assert_eq!(records[0].len(), 3);
        assert_eq!(records[0]["name"], CellValue::from("r1"));
        assert_eq!(records[0]["name.1"], CellValue::from("x"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvParser
            .parse(&dir.path().join("inventory.csv"), TableKind::Inventory)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open file"));
    }
}
