//! Configuration handling for motherstarter

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

/// Directory searched for `inventory.*` and `groups.*` when none is given
pub const DEFAULT_SOURCE_DIR: &str = "inputs";
/// Directory holding the `*.j2` templates when none is given
pub const DEFAULT_TEMPLATE_DIR: &str = "templates/core";
/// Root of every generated artifact when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
/// Log file written next to the console output
pub const DEFAULT_LOG_FILE: &str = "motherstarter.log";

/// Format of the inventory and groups source files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceType {
    Csv,
    #[default]
    Json,
    Xlsx,
}

impl SourceType {
    /// File extension of the source files
    pub fn extension(self) -> &'static str {
        match self {
            SourceType::Csv => "csv",
            SourceType::Json => "json",
            SourceType::Xlsx => "xlsx",
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(SourceType::Csv),
            "json" => Ok(SourceType::Json),
            "xlsx" => Ok(SourceType::Xlsx),
            _ => Err(ConvertError::UnsupportedSourceType(s.to_string())),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Which family of artifacts to generate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputType {
    #[default]
    All,
    Ansible,
    Csv,
    Json,
    Nornir,
    Pyats,
    Xlsx,
}

impl std::str::FromStr for OutputType {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(OutputType::All),
            "ansible" => Ok(OutputType::Ansible),
            "csv" => Ok(OutputType::Csv),
            "json" => Ok(OutputType::Json),
            "nornir" => Ok(OutputType::Nornir),
            "pyats" => Ok(OutputType::Pyats),
            "xlsx" => Ok(OutputType::Xlsx),
            _ => Err(ConvertError::UnsupportedOutputType(s.to_string())),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputType::All => "all",
            OutputType::Ansible => "ansible",
            OutputType::Csv => "csv",
            OutputType::Json => "json",
            OutputType::Nornir => "nornir",
            OutputType::Pyats => "pyats",
            OutputType::Xlsx => "xlsx",
        };
        f.write_str(name)
    }
}

/// Severity threshold for console and file logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// `EnvFilter` directive for this level; critical has no tracing
    /// equivalent and maps to error
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            _ => Err(ConvertError::UnsupportedLogLevel(s.to_string())),
        }
    }
}

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct Config {
    /// Format of the source files
    pub source_type: SourceType,
    /// Directory holding the source files, `None` for the default
    pub source_dir: Option<PathBuf>,
    /// Directory holding the templates, `None` for the default
    pub template_dir: Option<PathBuf>,
    /// Root directory for generated artifacts
    pub output_dir: PathBuf,
    /// Artifacts to generate
    pub output_type: OutputType,
    /// Logging threshold
    pub log_level: LogLevel,
    /// Log file path
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_type: SourceType::default(),
            source_dir: None,
            template_dir: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_type: OutputType::default(),
            log_level: LogLevel::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Set the source file type
    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    /// Set the source directory
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    /// Set the template directory
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Set the output root directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the output type
    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    /// Set the logging threshold
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set the log file path
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Source directory, falling back to [`DEFAULT_SOURCE_DIR`]
    pub fn source_dir(&self) -> &Path {
        self.source_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SOURCE_DIR))
    }

    /// Template directory, falling back to [`DEFAULT_TEMPLATE_DIR`]
    pub fn template_dir(&self) -> &Path {
        self.template_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_TEMPLATE_DIR))
    }
}
