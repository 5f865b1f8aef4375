//! The conversion workflow: load both tables, prepare templates, write artifacts

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::{Config, DEFAULT_SOURCE_DIR};
use crate::error::ConvertError;
use crate::loader::Loader;
use crate::model::TableKind;
use crate::output::{artifacts_for, ArtifactWriter, Templates};

/// Run one conversion and return the paths written, in write order.
///
/// Both tables and all templates are loaded before the first file is
/// written, so a bad source or template directory leaves no output behind.
pub fn run(config: &Config) -> Result<Vec<PathBuf>> {
    if config.source_dir.is_none() {
        warn!(
            "Source directory not specified, using default: {}",
            DEFAULT_SOURCE_DIR
        );
    }
    let source_dir = config.source_dir();
    debug!("Source directory is: {}", source_dir.display());
    if !source_dir.is_dir() {
        return Err(ConvertError::SourceDirNotFound(source_dir.to_path_buf()).into());
    }

    debug!("Inventory source type is {}", config.source_type);
    let loader = Loader::new(config.source_type, source_dir);
    let inventory = loader.load(TableKind::Inventory)?;
    let groups = loader.load(TableKind::Groups)?;

    let template_dir = config.template_dir();
    debug!("Source template directory is: {}", template_dir.display());
    let templates = Templates::load(template_dir)?;
    debug!("Loaded templates: {}", templates.names().join(", "));

    debug!("Output type is: {}", config.output_type);
    let writer = ArtifactWriter::new(&templates, &config.output_dir);

    let mut written = Vec::new();
    for artifact in artifacts_for(config.output_type) {
        let table = match artifact.table {
            TableKind::Inventory => &inventory,
            TableKind::Groups => &groups,
        };
        written.push(writer.write(artifact, table)?);
    }

    Ok(written)
}
