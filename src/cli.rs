// src/cli.rs
use std::{num::NonZeroUsize, path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};

use crate::config::consts::*;
use crate::config::options::{ImportOptions, RecordSource, ScanOptions};
use crate::core::net::HttpTransport;
use crate::error::{ImportError, Result};
use crate::progress::{ConsoleProgress, Progress};
use crate::record::Record;
use crate::{file, scrape, submit};

#[derive(Parser)]
#[command(name = "wallpaper_import", version)]
/// Scrape wallpaper records from Markdown tables and import them over HTTP
pub struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract records and show or save them
    Scan(ScanArgs),
    /// Submit records to the import endpoint in batches
    Import(ImportArgs),
    /// POST a single record to check the endpoint
    Probe(ProbeArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Directory of Markdown files to scan
    #[arg(long, default_value = DEFAULT_SCAN_DIR)]
    dir: PathBuf,
    /// JSON array of records to use instead of scanning (e.g. a failed-records file)
    #[arg(long, conflicts_with = "dir")]
    records: Option<PathBuf>,
    /// Only keep records from this month (YYYY-MM)
    #[arg(long)]
    month: Option<String>,
}

#[derive(Args)]
struct ScanArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Write the records as JSON to this file (or directory)
    #[arg(short, long)]
    out: Option<String>,
    /// How many sample records to print
    #[arg(long, default_value_t = 5)]
    show: usize,
}

#[derive(Args)]
struct ImportArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Import endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Records per request
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
    /// Attempts per batch before it counts as failed
    #[arg(long, default_value_t = MAX_RETRIES)]
    max_retries: u32,
    /// Where to save records that could not be submitted
    #[arg(long, default_value = FAILED_RECORDS_FILE)]
    failed_out: String,
}

#[derive(Args)]
struct ProbeArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Import endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose, cli.log_file.as_deref())?;

    let mut progress = ConsoleProgress::new();
    match cli.command {
        Command::Scan(args) => scan(args, &mut progress),
        Command::Import(args) => import(args, &mut progress),
        Command::Probe(args) => probe(args, &mut progress),
    }
}

fn scan(args: ScanArgs, progress: &mut ConsoleProgress) -> Result<()> {
    let records = load_records(&args.source, progress)?;
    progress.log(&format!("Found {} records", records.len()));
    for r in records.iter().take(args.show) {
        progress.log(&format!("  {} {} {}", r.date, r.title, r.url));
    }

    if let Some(out) = args.out {
        let path = file::resolve_single_out_path(&out, "records.json")?;
        file::write_records(&path, &records)?;
        progress.log(&format!("Wrote {}", path.display()));
    }
    Ok(())
}

fn import(args: ImportArgs, progress: &mut ConsoleProgress) -> Result<()> {
    let mut opts = ImportOptions::new(args.endpoint);
    opts.batch_size = NonZeroUsize::new(args.batch_size)
        .ok_or_else(|| ImportError::InvalidConfig(s!("batch size must be at least 1")))?;
    opts.retry.max_attempts = args.max_retries;
    opts.failed_out = file::resolve_single_out_path(&args.failed_out, FAILED_RECORDS_FILE)?;
    opts.validate()?;

    let records = load_records(&args.source, progress)?;
    if records.is_empty() {
        progress.log("No records found; nothing to submit");
        return Ok(());
    }
    progress.log(&format!("Found {} records", records.len()));

    let transport = HttpTransport::new()?;
    let report = submit::submit_in_batches(&transport, &records, &opts, Some(&mut *progress));

    progress.log(&report.to_string());
    if let Some(path) = file::write_failed_records(&report, &opts.failed_out)? {
        progress.log(&format!("Failed records saved to {}", path.display()));
    }
    Ok(())
}

fn probe(args: ProbeArgs, progress: &mut ConsoleProgress) -> Result<()> {
    let opts = ImportOptions::new(args.endpoint);
    opts.validate()?;

    let records = load_records(&args.source, progress)?;
    let Some(record) = records.first() else {
        progress.log("No records found; nothing to probe with");
        return Ok(());
    };

    let transport = HttpTransport::new()?;
    let timeout = Duration::from_secs(PROBE_TIMEOUT_SECS);
    let reply = submit::probe(&transport, &opts.endpoint, record, timeout)?;
    progress.log(&reply.status.to_string());
    progress.log(&reply.body);
    Ok(())
}

fn load_records(args: &SourceArgs, progress: &mut dyn Progress) -> Result<Vec<Record>> {
    let mut scan = ScanOptions::new(&args.dir);
    scan.set_month(args.month.as_deref())?;

    let source = match &args.records {
        Some(path) => RecordSource::Json(path.clone()),
        None => RecordSource::Markdown(scan.clone()),
    };
    let records = scrape::collect_records(&source, Some(&mut *progress))?;

    Ok(match (&source, scan.month()) {
        (RecordSource::Json(_), Some(month)) => scrape::filter_month(records, month),
        _ => records,
    })
}
