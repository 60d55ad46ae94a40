// src/config/options.rs
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::error::{ImportError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    pub dir: PathBuf,
    month: Option<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_SCAN_DIR),
            month: None,
        }
    }
}

impl ScanOptions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), month: None }
    }

    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }

    /// Restrict records to one `YYYY-MM` month. `None` clears the filter.
    pub fn set_month(&mut self, month: Option<&str>) -> Result<()> {
        self.month = match month.map(str::trim) {
            None | Some("") => None,
            Some(m) if is_month(m) => Some(s!(m)),
            Some(m) => return Err(ImportError::InvalidMonth(s!(m))),
        };
        Ok(())
    }
}

fn is_month(m: &str) -> bool {
    let b = m.as_bytes();
    b.len() == 7
        && b[4] == b'-'
        && b.iter().enumerate().all(|(i, c)| i == 4 || c.is_ascii_digit())
        && matches!(&m[5..], "01" | "02" | "03" | "04" | "05" | "06" | "07" | "08" | "09" | "10" | "11" | "12")
}

/// Where the records for a run come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordSource {
    /// Scan a directory of Markdown files.
    Markdown(ScanOptions),
    /// A JSON array of records, e.g. a previous run's failed-records file.
    Json(PathBuf),
}

impl Default for RecordSource {
    fn default() -> Self {
        RecordSource::Markdown(ScanOptions::default())
    }
}

/// How one batch is retried. `max_attempts` counts every POST, the first included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            retry_delay: Duration::from_secs(RETRY_DELAY_SECS),
            timeout: Duration::from_secs(BATCH_TIMEOUT_SECS),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given 1-based attempt failed, `None` once attempts are used up.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        (attempt < self.max_attempts).then_some(self.retry_delay)
    }
}

/// Fixed pause between consecutive batch submissions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Throttle {
    pub batch_pause: Duration,
}

impl Default for Throttle {
    fn default() -> Self {
        Self { batch_pause: Duration::from_secs(BATCH_PAUSE_SECS) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportOptions {
    pub endpoint: String,
    pub batch_size: NonZeroUsize,
    pub retry: RetryPolicy,
    pub throttle: Throttle,
    pub failed_out: PathBuf,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            endpoint: s!(DEFAULT_ENDPOINT),
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
            retry: RetryPolicy::default(),
            throttle: Throttle::default(),
            failed_out: PathBuf::from(FAILED_RECORDS_FILE),
        }
    }
}

impl ImportOptions {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), ..Self::default() }
    }

    /// Reject settings that would make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| ImportError::InvalidConfig(format!("endpoint {:?}: {e}", self.endpoint)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ImportError::InvalidConfig(format!(
                "endpoint must be http(s), got {}",
                url.scheme()
            )));
        }
        if self.retry.max_attempts == 0 {
            return Err(ImportError::InvalidConfig(s!("max retries must be at least 1")));
        }
        Ok(())
    }
}
