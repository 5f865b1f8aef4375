//! Domain errors for conversions

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised before any table is loaded or file written
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Source type '{0}' not supported, expected one of: csv, json, xlsx")]
    UnsupportedSourceType(String),

    #[error("Output type '{0}' not supported, expected one of: all, ansible, csv, json, nornir, pyats, xlsx")]
    UnsupportedOutputType(String),

    #[error("Log level '{0}' not supported, expected one of: debug, info, warning, error, critical")]
    UnsupportedLogLevel(String),

    #[error("Source directory not found: {}", .0.display())]
    SourceDirNotFound(PathBuf),

    #[error("Template directory not found: {}", .0.display())]
    TemplateDirNotFound(PathBuf),
}
