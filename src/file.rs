// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::error::{ImportError, Result};
use crate::record::Record;
use crate::submit::RunReport;

/// Read a JSON array of records (the format `write_records` produces).
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write records as a pretty-printed JSON array (2-space indent, UTF-8, non-ASCII kept literal).
/// Creates parent directories as needed; overwrites an existing file.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, records)?;
    out.flush()?;
    Ok(())
}

/// Persist the records that never made it, if any.
///
/// Returns the path written, or `None` when the run had no failures. A complete run
/// removes a file left at `path` by an earlier run so it cannot be mistaken for this one's.
pub fn write_failed_records(report: &RunReport, path: &Path) -> Result<Option<PathBuf>> {
    if report.is_complete() {
        match fs::remove_file(path) {
            Ok(()) => logf!("Removed stale {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        return Ok(None);
    }
    let failed = report.failed_records();
    write_records(path, &failed)?;
    logf!("Saved {} failed records to {}", failed.len(), path.display());
    Ok(Some(path.to_path_buf()))
}

/// `user_o` empty → `default_filename`; a directory (or trailing separator) → `dir/default_filename`.
pub fn resolve_single_out_path(user_o: &str, default_filename: &str) -> Result<PathBuf> {
    if user_o.is_empty() {
        return Ok(PathBuf::from(default_filename));
    }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(&p) || p.is_dir() {
        ensure_directory(&p)?;
        Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

/// Both `/` and `\` become the platform separator.
pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars()
        .map(|c| if c == '/' || c == '\\' { sep } else { c })
        .collect()
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ImportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
