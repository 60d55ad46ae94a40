// src/submit/mod.rs
//! Batched submission of records to the import endpoint.
//!
//! ```text
//! orchestrator::submit_in_batches ─┬→ batch::partition
//!                                  ├→ submitter::submit_batch ×N  (retry loop, Transport)
//!                                  └→ retry pass: one more attempt per failed batch
//!                                     ↘ RunReport (no I/O; file::write_failed_records persists)
//! ```
mod batch;
mod orchestrator;
mod report;
mod submitter;

pub use batch::{batch_count, partition, Batch};
pub use orchestrator::submit_in_batches;
pub use report::{FailedBatch, RunReport};
pub use submitter::{probe, submit_batch};
