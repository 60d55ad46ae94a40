// src/scrape/mod.rs
mod scrape;

pub use scrape::collect_records;
pub use scrape::filter_month;
pub use scrape::markdown_files;
