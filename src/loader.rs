//! Resolve and load the inventory and groups source files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::config::SourceType;
use crate::model::{Table, TableKind};
use crate::parser::ParserFactory;

/// Loads `<dir>/<kind>.<ext>` for a fixed source type
pub struct Loader {
    source_type: SourceType,
    dir: PathBuf,
    factory: ParserFactory,
}

impl Loader {
    pub fn new(source_type: SourceType, dir: impl Into<PathBuf>) -> Self {
        Self {
            source_type,
            dir: dir.into(),
            factory: ParserFactory::new(),
        }
    }

    /// Path of the source file for `kind`
    pub fn path_for(&self, kind: TableKind) -> PathBuf {
        self.dir.join(kind.file_name(self.source_type))
    }

    /// Parse the whole source file for `kind` into a table
    pub fn load(&self, kind: TableKind) -> Result<Table> {
        let path = self.path_for(kind);
        debug!("Loading {} from {}", kind, path.display());

        let table = self
            .factory
            .parse(&path, self.source_type, kind)
            .with_context(|| format!("Failed to load {} source: {}", kind, path.display()))?;

        debug!("Loaded {} {} records", table.row_count(), kind);
        for line in unnamed_rows(&table) {
            warn!("{} row {} in {} has no name", kind, line, path.display());
        }
        Ok(table)
    }
}

/// Field every inventory host and group is keyed by when rendered
const NAME_FIELD: &str = "name";

/// Source lines of rows whose name is missing or blank
fn unnamed_rows(table: &Table) -> Vec<usize> {
    let name_index = table
        .columns
        .iter()
        .find(|c| c.name == NAME_FIELD)
        .map(|c| c.index);

    table
        .rows
        .iter()
        .filter(|row| match name_index.and_then(|i| row.get(i)) {
            Some(value) => value.display().trim().is_empty(),
            None => true,
        })
        .map(|row| row.source_line)
        .collect()
}

/// Convenience function to load one table
pub fn load(kind: TableKind, source_type: SourceType, dir: &Path) -> Result<Table> {
    Loader::new(source_type, dir).load(kind)
}
