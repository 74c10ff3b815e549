use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use corpex::{
    flatten, render, sentences, CleanConfig, CsvWriter, Dialect, RenderOptions, Target,
};

#[derive(Debug, Parser)]
#[command(
    name = "corpex",
    version,
    about = "Flatten and convert CMDI/PSDX/FLEx corpus files"
)]
struct Args {
    /// Input file or directory
    #[arg(value_name = "INPUT")]
    input: PathBuf,
    /// Output format (csv, text, xml)
    #[arg(short, long, value_enum)]
    to: TargetArg,
    /// Output file (defaults to stdout; required for directory input)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Corpus dialect (inferred from extension and root tag when omitted)
    #[arg(short, long, value_enum)]
    dialect: Option<DialectArg>,
    /// Punctuation characters removed from sentences
    #[arg(long, value_name = "CHARS")]
    strip: Option<String>,
    /// Metadata field injected with --to xml
    #[arg(long, value_name = "KEY=VALUE")]
    stamp: Option<String>,
    /// Path prefix prepended to flattened rows
    #[arg(long, value_name = "PATH")]
    prefix: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TargetArg {
    Csv,
    Text,
    Xml,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DialectArg {
    Cmdi,
    Psdx,
    Flex,
    Generic,
}

impl From<TargetArg> for Target {
    fn from(value: TargetArg) -> Self {
        match value {
            TargetArg::Csv => Self::Csv,
            TargetArg::Text => Self::Text,
            TargetArg::Xml => Self::Xml,
        }
    }
}

impl From<DialectArg> for Dialect {
    fn from(value: DialectArg) -> Self {
        match value {
            DialectArg::Cmdi => Self::Cmdi,
            DialectArg::Psdx => Self::Psdx,
            DialectArg::Flex => Self::Flex,
            DialectArg::Generic => Self::Generic,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let target = Target::from(args.to);
    let clean = match &args.strip {
        Some(chars) => CleanConfig::new(chars.chars()),
        None => CleanConfig::default(),
    };
    let stamp = args
        .stamp
        .as_deref()
        .map(|raw| -> Result<(String, String)> {
            let (key, value) = raw
                .split_once('=')
                .context("--stamp expects KEY=VALUE")?;
            Ok((key.to_string(), value.to_string()))
        })
        .transpose()?;

    if args.input.is_dir() {
        run_batch(&args, target, &clean)
    } else {
        let options = RenderOptions {
            clean,
            prefix: args.prefix.clone(),
            source: Some(file_label(&args.input)),
            stamp,
        };
        let input = std::fs::read_to_string(&args.input)
            .with_context(|| format!("failed to read {}", args.input.display()))?;
        let dialect = dialect_for(&args, &args.input);
        let output = render(&input, dialect, target, &options)
            .with_context(|| format!("failed to convert {}", args.input.display()))?;
        write_output(&args.output, output.as_bytes())
    }
}

/// Convert every corpus file in a directory, in name order. Files that
/// fail to read or parse are logged and skipped; the destination being
/// unwritable is fatal.
#[tracing::instrument(skip_all, fields(input = %args.input.display()))]
fn run_batch(args: &Args, target: Target, clean: &CleanConfig) -> Result<()> {
    let output = args
        .output
        .as_ref()
        .context("--output is required for directory input")?;
    if matches!(target, Target::Xml) {
        bail!("--to xml requires a single input file");
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(&args.input)
        .with_context(|| format!("failed to read directory {}", args.input.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_corpus_file(path))
        .collect();
    paths.sort();

    let file = File::create(output)
        .with_context(|| format!("failed to create output file {}", output.display()))?;
    let mut converted = 0usize;
    let mut skipped = 0usize;

    match target {
        Target::Csv => {
            let mut writer = CsvWriter::new(file).context("failed to write output header")?;
            for path in &paths {
                match read_and_parse(path) {
                    Ok(doc) => {
                        let rows = match args.prefix.as_deref() {
                            Some(prefix) => corpex::flatten_with_prefix(&doc, prefix),
                            None => flatten(&doc),
                        };
                        writer
                            .write_rows(&file_label(path), rows)
                            .with_context(|| format!("failed to write {}", output.display()))?;
                        converted += 1;
                    }
                    Err(e) => {
                        warn!("skipping {}: {e}", path.display());
                        skipped += 1;
                    }
                }
            }
        }
        Target::Text => {
            let mut file = file;
            for path in &paths {
                match read_and_parse(path) {
                    Ok(doc) => {
                        let dialect =
                            dialect_for(args, path).unwrap_or_else(|| Dialect::detect(&doc));
                        let rules = dialect.rules();
                        corpex::write_text(&mut file, sentences(&doc, &rules, clean))
                            .with_context(|| format!("failed to write {}", output.display()))?;
                        converted += 1;
                    }
                    Err(e) => {
                        warn!("skipping {}: {e}", path.display());
                        skipped += 1;
                    }
                }
            }
        }
        Target::Xml => unreachable!("rejected above"),
    }

    info!("converted {converted} files, skipped {skipped}");
    Ok(())
}

fn read_and_parse(path: &Path) -> corpex::Result<corpex::Document> {
    let input = std::fs::read(path)?;
    corpex::parse_bytes(&input)
}

fn dialect_for(args: &Args, path: &Path) -> Option<Dialect> {
    if let Some(dialect) = args.dialect {
        return Some(dialect.into());
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Dialect::from_extension)
}

fn is_corpus_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    matches!(
        ext.to_ascii_lowercase().as_str(),
        "xml" | "cmdi" | "psdx" | "flextext"
    )
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
