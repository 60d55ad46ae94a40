// src/submit/batch.rs
use std::num::NonZeroUsize;

use crate::record::Record;

/// A contiguous run of records sent as one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Batch<'a> {
    /// 1-based: `offset / batch_size + 1`
    pub number: usize,
    pub records: &'a [Record],
}

impl Batch<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Split `records` into consecutive batches of `size`; only the last may be shorter.
pub fn partition(records: &[Record], size: NonZeroUsize) -> impl Iterator<Item = Batch<'_>> {
    records
        .chunks(size.get())
        .enumerate()
        .map(|(i, records)| Batch { number: i + 1, records })
}

pub fn batch_count(total: usize, size: NonZeroUsize) -> usize {
    total.div_ceil(size.get())
}
