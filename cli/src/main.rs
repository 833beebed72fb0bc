use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use schema_exporter_core::config::DEFAULT_MAX_DEPTH;
use schema_exporter_core::{convert, ConvertOptions, LegacyModule, LegacyProject};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::level_filters::LevelFilter;

/// Default destination root, relative to the project directory.
const DEFAULT_FOLDER: &str = "lib/modules";
/// File written into each module folder.
const SCHEMA_FILE: &str = "schema.js";

#[derive(Parser)]
#[command(name = "schema-exporter")]
#[command(about = "Export Apostrophe 2 field schemas to Apostrophe 3 format")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every module of a legacy project into <FOLDER>/<module>/schema.js
    Export {
        /// Legacy project description (JSON with a `modules` list)
        input: PathBuf,

        /// Folder to search for module folders
        #[arg(short, long, default_value = DEFAULT_FOLDER)]
        folder: PathBuf,

        #[command(flatten)]
        conversion: ConversionArgs,
    },

    /// Convert a single legacy field list to the successor `{add, group}` form
    Convert {
        /// Legacy field list (JSON array)
        input: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write conversion warnings to this file as JSON
        #[arg(long)]
        warnings: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,

        #[command(flatten)]
        conversion: ConversionArgs,
    },
}

#[derive(Args)]
struct ConversionArgs {
    /// Drop tag lists instead of converting them to arrays
    #[arg(long)]
    drop_tags: bool,

    /// Max nesting depth of sub-schemas
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Extra widget rename, e.g. `--widget-alias gallery=@apostrophecms/image`
    #[arg(long = "widget-alias", value_name = "LEGACY=SUCCESSOR", value_parser = parse_alias)]
    widget_aliases: Vec<(String, String)>,
}

impl ConversionArgs {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            keep_tags: !self.drop_tags,
            max_depth: self.max_depth,
            widget_aliases: self.widget_aliases.iter().cloned().collect(),
        }
    }
}

fn parse_alias(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((legacy, successor)) if !legacy.is_empty() && !successor.is_empty() => {
            Ok((legacy.to_string(), successor.to_string()))
        }
        _ => Err(format!("expected LEGACY=SUCCESSOR, got '{raw}'")),
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Export {
            input,
            folder,
            conversion,
        } => {
            let project: LegacyProject = read_json(&input, "project")?;
            let options = conversion.options();

            let mut exported = 0;
            let mut skipped = 0;
            for module in &project.modules {
                match export_module(module, &folder, &options) {
                    Ok(true) => exported += 1,
                    Ok(false) => skipped += 1,
                    Err(err) => {
                        tracing::warn!(module = %module.name, "skipping module: {err:#}");
                        skipped += 1;
                    }
                }
            }

            eprintln!("exported {exported} module(s), skipped {skipped}");
        }
        Commands::Convert {
            input,
            output,
            warnings,
            format,
            conversion,
        } => {
            let fields: serde_json::Value = read_json(&input, "field schema")?;

            let result = convert(&fields, &conversion.options())
                .map_err(|e| anyhow::Error::from(e).context("Conversion failed"))?;

            write_json(&result.schema, output.as_ref(), format)?;

            if let Some(path) = warnings {
                write_json(&result.warnings, Some(&path), format)?;
            }
        }
    }

    Ok(())
}

/// Convert and write one module. Returns `Ok(false)` when the module is
/// skipped without error (empty schema or no destination folder).
fn export_module(module: &LegacyModule, folder: &Path, options: &ConvertOptions) -> Result<bool> {
    if module.schema.is_empty() {
        tracing::debug!(module = %module.name, "no fields; skipping");
        return Ok(false);
    }

    let destination = folder.join(&module.name);
    if !destination.is_dir() {
        tracing::info!(
            module = %module.name,
            folder = %destination.display(),
            "destination folder does not exist; skipping"
        );
        return Ok(false);
    }

    let export = module
        .export(options)
        .map_err(|e| anyhow::Error::from(e).context(format!("Conversion failed for {}", module.name)))?;

    write_atomic(&destination.join(SCHEMA_FILE), &export.render())?;
    tracing::debug!(module = %module.name, "wrote {SCHEMA_FILE}");
    Ok(true)
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {what} from: {}", path.display()))
}

/// Write through a temporary file in the same folder so a failure never
/// leaves a half-written target.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("No parent folder for {}", path.display()))?;
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(())
}

fn write_json<T: serde::Serialize>(
    val: &T,
    path: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
