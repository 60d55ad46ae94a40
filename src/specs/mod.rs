// src/specs/mod.rs
//! # Source “specs” module
//!
//! Hosts the **document-specific extraction rules**: where the wallpaper data lives
//! in a source document and how to pull it out.
//!
//! ## What lives here
//! - **Pure text parsing** of already-loaded documents (no file or network access).
//! - **Pattern choice**: which lines count as table rows, which cells hold an image
//!   link followed by its date.
//! - **Light shaping** of matches into [`Record`](crate::Record)s, with URL cleaning
//!   delegated to `core::url`.
//!
//! ## What does **not** live here
//! - Directory walking and file reading (`scrape::collect_records`).
//! - Submission, batching, persistence (`submit`, `file`).
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::collect_records → specs::wallpaper_table::parse_markdown
//!                             ↘  Vec<Record> in file/line/cell order
//!        submit::submit_in_batches (outside of specs)
//! ```
//!
//! ## Conventions
//! - Output order follows input order; no dedup, no sorting.
//! - Specs are testable offline against inline fixtures.
pub mod wallpaper_table;
