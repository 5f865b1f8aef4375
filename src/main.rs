//! motherstarter - network automation inventory translation

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use motherstarter::config::{
    Config, LogLevel, OutputType, SourceType, DEFAULT_LOG_FILE, DEFAULT_OUTPUT_DIR,
};
use motherstarter::{logging, pipeline};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl From<CliLogLevel> for LogLevel {
    fn from(l: CliLogLevel) -> Self {
        match l {
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Warning => LogLevel::Warning,
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Critical => LogLevel::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSourceType {
    Csv,
    Json,
    Xlsx,
}

impl From<CliSourceType> for SourceType {
    fn from(s: CliSourceType) -> Self {
        match s {
            CliSourceType::Csv => SourceType::Csv,
            CliSourceType::Json => SourceType::Json,
            CliSourceType::Xlsx => SourceType::Xlsx,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputType {
    All,
    Ansible,
    Csv,
    Json,
    Nornir,
    Pyats,
    Xlsx,
}

impl From<CliOutputType> for OutputType {
    fn from(o: CliOutputType) -> Self {
        match o {
            CliOutputType::All => OutputType::All,
            CliOutputType::Ansible => OutputType::Ansible,
            CliOutputType::Csv => OutputType::Csv,
            CliOutputType::Json => OutputType::Json,
            CliOutputType::Nornir => OutputType::Nornir,
            CliOutputType::Pyats => OutputType::Pyats,
            CliOutputType::Xlsx => OutputType::Xlsx,
        }
    }
}

/// Translate inventory source files into network automation inventories
#[derive(Parser, Debug)]
#[command(name = "motherstarter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert source file(s) into network automation inventory outputs
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Logging level
    #[arg(short = 'l', long, value_enum, ignore_case = true, default_value = "debug")]
    log_level: CliLogLevel,

    /// Source file type
    #[arg(short = 's', long, value_enum, ignore_case = true, default_value = "json")]
    source_type: CliSourceType,

    /// Directory holding inventory.<type> and groups.<type> [default: inputs]
    #[arg(short = 'd', long)]
    source_dir: Option<PathBuf>,

    /// Directory holding the templates [default: templates/core]
    #[arg(short = 't', long)]
    template_dir: Option<PathBuf>,

    /// Output file types; takes one option
    #[arg(short = 'o', long, value_enum, ignore_case = true, default_value = "all")]
    output_type: CliOutputType,

    /// Root directory for generated files
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Log file, appended to on every run
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

impl From<ConvertArgs> for Config {
    fn from(args: ConvertArgs) -> Self {
        Config {
            source_type: args.source_type.into(),
            source_dir: args.source_dir,
            template_dir: args.template_dir,
            output_dir: args.output_dir,
            output_type: args.output_type.into(),
            log_level: args.log_level.into(),
            log_file: args.log_file,
        }
    }
}

/// Two-letter short flags accepted for compatibility, and their long forms
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-st", "--source-type"),
    ("-sd", "--source-dir"),
    ("-td", "--template-dir"),
    ("-od", "--output-dir"),
];

/// Options whose next argument is a value, which is never rewritten
const VALUE_OPTIONS: &[&str] = &[
    "-l",
    "--log-level",
    "-s",
    "--source-type",
    "-d",
    "--source-dir",
    "-t",
    "--template-dir",
    "-o",
    "--output-type",
    "--output-dir",
    "--log-file",
];

/// Rewrite legacy two-letter short flags (`-st csv`, `-st=csv`) into long
/// flags clap understands. Option values and everything after `--` pass
/// through untouched.
fn expand_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut expanded = Vec::new();
    let mut args = args.into_iter();
    let mut value_next = false;

    while let Some(arg) = args.next() {
        if value_next {
            value_next = false;
            expanded.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            expanded.push(arg);
            continue;
        };

        if text == "--" {
            expanded.push(arg);
            expanded.extend(args);
            break;
        }

        let (flag, value) = match text.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (text, None),
        };

        match LEGACY_FLAGS.iter().find(|(short, _)| *short == flag) {
            Some((_, long)) => {
                value_next = value.is_none();
                expanded.push(match value {
                    Some(value) => OsString::from(format!("{}={}", long, value)),
                    None => OsString::from(long),
                });
            }
            None => {
                value_next = value.is_none() && VALUE_OPTIONS.contains(&flag);
                expanded.push(arg);
            }
        }
    }

    expanded
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(expand_legacy_flags(std::env::args_os()));

    let result = match cli.command {
        Command::Convert(args) => convert(args.into()),
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    })
}

/// Run one conversion under a subscriber that lives for this run only.
/// Pipeline failures are logged there; only logger setup errors escape.
fn convert(config: Config) -> Result<ExitCode> {
    let subscriber = logging::subscriber(config.log_level, &config.log_file)?;

    Ok(tracing::subscriber::with_default(subscriber, || {
        match pipeline::run(&config) {
            Ok(written) => {
                tracing::debug!("Wrote {} file(s)", written.len());
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("{:#}", e);
                ExitCode::FAILURE
            }
        }
    }))
}
