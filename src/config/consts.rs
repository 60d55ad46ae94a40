// src/config/consts.rs

// Net config
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/import";
pub const USER_AGENT: &str = concat!("wallpaper_import/", env!("CARGO_PKG_VERSION"));
pub const BATCH_TIMEOUT_SECS: u64 = 30;
pub const PROBE_TIMEOUT_SECS: u64 = 10;

// Submission
pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY_SECS: u64 = 5;
pub const BATCH_PAUSE_SECS: u64 = 2; // be polite

// Export
pub const FAILED_RECORDS_FILE: &str = "failed_import_data.json";

// Scan
pub const DEFAULT_SCAN_DIR: &str = "./zh-cn";
pub const MARKDOWN_SUFFIX: &str = ".md";
pub const ALLOWED_QUERY_KEYS: &[&str] = &["id", "th"];

// Record shaping
pub const TITLE_PREFIX: &str = "https://cn.bing.com/th?id=";
pub const TITLE_SUFFIX: &str = "_UHD.jpg";
pub const DEFAULT_COPYRIGHT: &str = "© Bing";
