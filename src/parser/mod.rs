//! Parser layer for reading the supported source formats

mod csv;
mod excel;
mod json;

use std::path::Path;

use anyhow::{bail, Result};

use crate::config::SourceType;
use crate::model::{Table, TableKind};

pub use self::csv::CsvParser;
pub use self::excel::ExcelParser;
pub use self::json::JsonParser;

/// Trait for parsing tabular source files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path, kind: TableKind) -> Result<Table>;

    /// Check if this parser handles the given source type
    fn supports(&self, source_type: SourceType) -> bool;
}

/// Factory for selecting a parser by source type
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(CsvParser),
                Box::new(ExcelParser),
                Box::new(JsonParser),
            ],
        }
    }

    /// Get the parser for the given source type
    pub fn get_parser(&self, source_type: SourceType) -> Result<&dyn Parser> {
        for parser in &self.parsers {
            if parser.supports(source_type) {
                return Ok(parser.as_ref());
            }
        }

        bail!("No parser registered for source type: {}", source_type)
    }

    /// Parse a file using the parser for `source_type`
    pub fn parse(&self, path: &Path, source_type: SourceType, kind: TableKind) -> Result<Table> {
        let parser = self.get_parser(source_type)?;
        parser.parse(path, kind)
    }
}
