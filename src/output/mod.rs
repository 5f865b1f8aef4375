//! Encoding tables into artifact files

mod csv;
mod json;
mod template;
mod xlsx;

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::OutputType;
use crate::model::{Table, TableKind};

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::template::{escape_markup, TemplateOutput, Templates};
pub use self::xlsx::XlsxOutput;

/// Trait for table encoders
pub trait Encoder {
    /// Encode the whole table to a writer
    fn encode(&self, table: &Table, kind: TableKind, writer: &mut dyn Write) -> Result<()>;
}

/// How an artifact is produced from its table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Render the named template with the records bound to the table's variable
    Template(&'static str),
    Csv,
    Xlsx,
    Json,
}

/// One generated file: which table, how it is encoded, where it goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artifact {
    pub table: TableKind,
    pub encoding: Encoding,
    /// Path relative to the output directory
    pub path: &'static str,
}

pub const NORNIR_HOSTS: Artifact = Artifact {
    table: TableKind::Inventory,
    encoding: Encoding::Template("nornir/hosts.j2"),
    path: "nr/inventory/hosts.yaml",
};

pub const NORNIR_GROUPS: Artifact = Artifact {
    table: TableKind::Groups,
    encoding: Encoding::Template("nornir/groups.j2"),
    path: "nr/inventory/groups.yaml",
};

pub const PYATS_TESTBED: Artifact = Artifact {
    table: TableKind::Inventory,
    encoding: Encoding::Template("pyats/testbed.j2"),
    path: "pyats/mother_starter_tb.yaml",
};

pub const ANSIBLE_HOSTS: Artifact = Artifact {
    table: TableKind::Inventory,
    encoding: Encoding::Template("ansible/hosts.j2"),
    path: "ansible/inventory/hosts",
};

pub const CSV_INVENTORY: Artifact = Artifact {
    table: TableKind::Inventory,
    encoding: Encoding::Csv,
    path: "csv/inventory.csv",
};

pub const CSV_GROUPS: Artifact = Artifact {
    table: TableKind::Groups,
    encoding: Encoding::Csv,
    path: "csv/groups.csv",
};

pub const XLSX_INVENTORY: Artifact = Artifact {
    table: TableKind::Inventory,
    encoding: Encoding::Xlsx,
    path: "xlsx/inventory.xlsx",
};

pub const XLSX_GROUPS: Artifact = Artifact {
    table: TableKind::Groups,
    encoding: Encoding::Xlsx,
    path: "xlsx/groups.xlsx",
};

pub const JSON_INVENTORY: Artifact = Artifact {
    table: TableKind::Inventory,
    encoding: Encoding::Json,
    path: "json/inventory.json",
};

pub const JSON_GROUPS: Artifact = Artifact {
    table: TableKind::Groups,
    encoding: Encoding::Json,
    path: "json/groups.json",
};

/// Artifacts generated for an output type, in write order
pub fn artifacts_for(output_type: OutputType) -> &'static [Artifact] {
    match output_type {
        OutputType::All => &[
            NORNIR_HOSTS,
            NORNIR_GROUPS,
            CSV_INVENTORY,
            XLSX_INVENTORY,
            CSV_GROUPS,
            XLSX_GROUPS,
            PYATS_TESTBED,
            ANSIBLE_HOSTS,
            JSON_INVENTORY,
            JSON_GROUPS,
        ],
        OutputType::Nornir => &[NORNIR_HOSTS, NORNIR_GROUPS],
        OutputType::Csv => &[CSV_INVENTORY, CSV_GROUPS],
        OutputType::Xlsx => &[XLSX_INVENTORY, XLSX_GROUPS],
        OutputType::Json => &[JSON_INVENTORY, JSON_GROUPS],
        OutputType::Pyats => &[PYATS_TESTBED],
        OutputType::Ansible => &[ANSIBLE_HOSTS],
    }
}

/// Factory for creating encoders
pub struct OutputFactory;

impl OutputFactory {
    /// Create an encoder for an encoding; template encoders borrow the loaded templates
    pub fn create<'a>(encoding: Encoding, templates: &'a Templates) -> Box<dyn Encoder + 'a> {
        match encoding {
            Encoding::Template(name) => Box::new(TemplateOutput::new(templates, name)),
            Encoding::Csv => Box::new(CsvOutput::new()),
            Encoding::Xlsx => Box::new(XlsxOutput::new()),
            Encoding::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Writes artifacts under one output directory
pub struct ArtifactWriter<'a> {
    templates: &'a Templates,
    output_dir: PathBuf,
}

impl<'a> ArtifactWriter<'a> {
    pub fn new(templates: &'a Templates, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates,
            output_dir: output_dir.into(),
        }
    }

    /// Encode `table` in full, then write it to the artifact's path in one call
    pub fn write(&self, artifact: &Artifact, table: &Table) -> Result<PathBuf> {
        let path = self.output_dir.join(artifact.path);

        let encoder = OutputFactory::create(artifact.encoding, self.templates);
        let mut buffer = Vec::new();
        encoder
            .encode(table, artifact.table, &mut buffer)
            .with_context(|| format!("Failed to encode {}", path.display()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, &buffer)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        info!("File output location: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Column};

    fn groups() -> Table {
        let mut table = Table::new(vec![Column::new("name", 0), Column::new("platform", 1)]);
        table.add_row(vec!["ios".into(), "cisco_ios".into()], 2);
        table.add_row(vec!["eos".into(), CellValue::Null], 3);
        table
    }

    #[test]
    fn test_all_covers_every_artifact_once() {
        let all = artifacts_for(OutputType::All);
        assert_eq!(all.len(), 10);

        let mut paths: Vec<_> = all.iter().map(|a| a.path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 10);

        for output_type in [
            OutputType::Ansible,
            OutputType::Csv,
            OutputType::Json,
            OutputType::Nornir,
            OutputType::Pyats,
            OutputType::Xlsx,
        ] {
            for artifact in artifacts_for(output_type) {
                assert!(all.contains(artifact), "{} missing from all", artifact.path);
            }
        }
    }

    #[test]
    fn test_single_output_types() {
        assert_eq!(artifacts_for(OutputType::Nornir), &[NORNIR_HOSTS, NORNIR_GROUPS]);
        assert_eq!(artifacts_for(OutputType::Pyats), &[PYATS_TESTBED]);
        assert_eq!(artifacts_for(OutputType::Ansible), &[ANSIBLE_HOSTS]);
        assert!(artifacts_for(OutputType::Json)
            .iter()
            .all(|a| a.encoding == Encoding::Json));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let templates = Templates::default();
        let writer = ArtifactWriter::new(&templates, dir.path().join("out"));

        let path = writer.write(&CSV_GROUPS, &groups()).unwrap();
        assert_eq!(path, dir.path().join("out/csv/groups.csv"));

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "name,platform\nios,cisco_ios\neos,\n");

        // Writing again into the existing directory is fine
        writer.write(&CSV_GROUPS, &groups()).unwrap();
    }

    #[test]
    fn test_missing_template_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let templates = Templates::default();
        let writer = ArtifactWriter::new(&templates, dir.path());

        assert!(writer.write(&NORNIR_GROUPS, &groups()).is_err());
        assert!(!dir.path().join(NORNIR_GROUPS.path).exists());
    }
}
