// src/scrape/scrape.rs
use std::{fs, path::{Path, PathBuf}};

use walkdir::WalkDir;

use crate::{
    config::consts::MARKDOWN_SUFFIX,
    config::options::{RecordSource, ScanOptions},
    error::{ImportError, Result},
    file,
    progress::Progress,
    record::Record,
    specs::wallpaper_table,
};

/// Load the records for a run from whichever source was selected.
pub fn collect_records(
    source: &RecordSource,
    progress: Option<&mut dyn Progress>,
) -> Result<Vec<Record>> {
    match source {
        RecordSource::Markdown(scan) => scan_markdown(scan, progress),
        RecordSource::Json(path) => {
            let records = file::load_records(path)?;
            logf!("Loaded {} records from {}", records.len(), path.display());
            Ok(records)
        }
    }
}

/// All `.md` files under `dir`, sorted by path so runs are reproducible.
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(if dir.exists() {
            ImportError::NotADirectory(dir.to_path_buf())
        } else {
            ImportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("scan directory not found: {}", dir.display()),
            ))
        });
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                loge!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let is_md = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(MARKDOWN_SUFFIX));
        if is_md {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

/// Keep records whose date falls in `month` (`YYYY-MM`).
pub fn filter_month(records: Vec<Record>, month: &str) -> Vec<Record> {
    records.into_iter().filter(|r| r.month() == month).collect()
}

fn scan_markdown(
    scan: &ScanOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<Record>> {
    let files = markdown_files(&scan.dir)?;
    logd!("Found {} markdown files under {}", files.len(), scan.dir.display());

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Scanning {} markdown files in {}…", files.len(), scan.dir.display()));
        p.begin(files.len());
    }

    let mut records = Vec::new();
    for (i, path) in files.iter().enumerate() {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                loge!("Cannot read {}: {e}", path.display());
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(i + 1, 0);
                }
                continue;
            }
        };
        let found = wallpaper_table::parse_markdown(&text);
        logd!("{}: {} records", path.display(), found.len());
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(i + 1, found.len());
        }
        records.extend(found);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    Ok(match scan.month() {
        Some(month) => filter_month(records, month),
        None => records,
    })
}
