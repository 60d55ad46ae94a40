// src/submit/report.rs
use std::fmt;

use super::Batch;
use crate::record::Record;

/// A batch that was not accepted, with its own copy of the records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedBatch {
    pub number: usize,
    pub records: Vec<Record>,
}

impl FailedBatch {
    pub fn as_batch(&self) -> Batch<'_> {
        Batch { number: self.number, records: &self.records }
    }
}

impl From<Batch<'_>> for FailedBatch {
    fn from(b: Batch<'_>) -> Self {
        Self { number: b.number, records: b.records.to_vec() }
    }
}

/// Outcome of one submission run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub total_items: usize,
    pub successful_items: usize,
    /// Batches still failing after the retry pass, in batch order.
    pub failed: Vec<FailedBatch>,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_items(&self) -> usize {
        self.failed.iter().map(|b| b.records.len()).sum()
    }

    /// Records of all failed batches, flattened in input order.
    pub fn failed_records(&self) -> Vec<Record> {
        self.failed.iter().flat_map(|b| b.records.iter().cloned()).collect()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Submitted {}/{} records", self.successful_items, self.total_items)?;
        if !self.is_complete() {
            write!(
                f,
                "; {} batches ({} records) still failing",
                self.failed.len(),
                self.failed_items()
            )?;
        }
        Ok(())
    }
}
