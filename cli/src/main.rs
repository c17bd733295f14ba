use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use configer::num::format_float;
use configer::{Configer, Registry, Value};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "configer", version, about = "Read and edit INI and JSON configuration files")]
struct Args {
    /// File format (auto-detected from the extension when omitted).
    #[arg(long, value_enum, global = true, value_name = "format")]
    format: Option<FormatArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the value stored under a key (`section::key` selects a section).
    Get {
        file: PathBuf,
        key: String,
        /// Read the value as this type.
        #[arg(long = "type", value_enum, default_value_t = ValueType::String)]
        value_type: ValueType,
    },
    /// Set a key and save the file.
    Set {
        file: PathBuf,
        key: String,
        value: String,
        /// Save to this path instead of rewriting the input.
        #[arg(short, long, value_name = "file")]
        output: Option<PathBuf>,
    },
    /// Print every key=value pair of a section.
    Section { file: PathBuf, name: String },
    /// Print the whole configuration as JSON.
    Dump {
        file: PathBuf,
        /// Indentation size (0 prints compact JSON).
        #[arg(long, value_name = "number", default_value_t = 2)]
        indent: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Ini,
    Json,
}

impl FormatArg {
    fn adapter_name(self) -> &'static str {
        match self {
            FormatArg::Ini => "ini",
            FormatArg::Json => "json",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ValueType {
    String,
    Strings,
    Int,
    Int64,
    Float,
    Bool,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let registry = Registry::with_defaults();

    match &args.command {
        Command::Get {
            file,
            key,
            value_type,
        } => {
            let cfg = open(&registry, args.format, file)?;
            let rendered = read_value(cfg.as_ref(), key, *value_type)?;
            println!("{rendered}");
        }
        Command::Set {
            file,
            key,
            value,
            output,
        } => {
            let cfg = open(&registry, args.format, file)?;
            cfg.set(key, value)?;
            let target = output.as_deref().unwrap_or(file.as_path());
            cfg.save_config_file(target)?;
            println!("✔ Set {key} in {}", target.display());
        }
        Command::Section { file, name } => {
            let cfg = open(&registry, args.format, file)?;
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            for (key, value) in cfg.section(name)? {
                writeln!(handle, "{key}={value}")?;
            }
        }
        Command::Dump { file, indent } => {
            let cfg = open(&registry, args.format, file)?;
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_json(&mut handle, &cfg.cfg_data(), *indent)?;
            writeln!(handle)?;
        }
    }
    Ok(())
}

fn open(
    registry: &Registry,
    format: Option<FormatArg>,
    file: &Path,
) -> Result<Box<dyn Configer>, Box<dyn Error>> {
    let format = format.unwrap_or_else(|| detect_format(file));
    debug!(file = %file.display(), format = format.adapter_name(), "opening config");
    registry
        .new_config(format.adapter_name(), file)
        .map_err(|err| format!("{}: {err}", file.display()).into())
}

fn detect_format(file: &Path) -> FormatArg {
    match file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => FormatArg::Json,
        _ => FormatArg::Ini,
    }
}

fn read_value(
    cfg: &dyn Configer,
    key: &str,
    value_type: ValueType,
) -> Result<String, Box<dyn Error>> {
    let rendered = match value_type {
        ValueType::String => cfg.string(key),
        ValueType::Strings => cfg.strings(key).unwrap_or_default().join("\n"),
        ValueType::Int => cfg.int(key)?.to_string(),
        ValueType::Int64 => cfg.int64(key)?.to_string(),
        ValueType::Float => format_float(cfg.float(key)?),
        ValueType::Bool => cfg.bool(key)?.to_string(),
    };
    Ok(rendered)
}

fn write_json(writer: &mut dyn Write, value: &Value, indent: usize) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(writer, value)?;
        return Ok(());
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}
