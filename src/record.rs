// src/record.rs
use serde::{Deserialize, Serialize};

use crate::config::consts::{DEFAULT_COPYRIGHT, TITLE_PREFIX, TITLE_SUFFIX};

/// One wallpaper entry as the import endpoint expects it.
/// Field names are part of the remote import schema; do not rename.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// `YYYY-MM-DD`
    pub date: String,
    pub url: String,
    pub title: String,
    pub copyright: String,
}

impl Record {
    /// Build a record from an already-cleaned image URL.
    /// The title is the image id: the URL minus the host prefix and the `_UHD.jpg` suffix.
    pub fn from_clean_url(date: &str, url: String) -> Self {
        let title = url.replace(TITLE_PREFIX, "").replace(TITLE_SUFFIX, "");
        Self {
            date: s!(date),
            url,
            title,
            copyright: s!(DEFAULT_COPYRIGHT),
        }
    }

    /// `YYYY-MM` part of the date.
    pub fn month(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }
}
