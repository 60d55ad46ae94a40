// src/core/url.rs
use ::url::Url;

use crate::config::consts::ALLOWED_QUERY_KEYS;

/// Strip an image URL down to the allow-listed query keys (`id`, `th`).
pub fn clean_url(raw: &str) -> String {
    clean_url_with(raw, ALLOWED_QUERY_KEYS)
}

/// Keep only `allowed` query keys, drop the fragment.
///
/// Blank values are dropped. Repeated keys are grouped at the position of their
/// first occurrence, values kept in order. Input that does not parse as a URL is
/// returned unchanged.
pub fn clean_url_with(raw: &str, allowed: &[&str]) -> String {
    let mut url = match Url::parse(raw) {
        Ok(u) => u,
        Err(e) => {
            logd!("Keeping unparseable URL {raw:?}: {e}");
            return s!(raw);
        }
    };

    let mut kept: Vec<(String, Vec<String>)> = Vec::new();
    for (k, v) in url.query_pairs() {
        if v.is_empty() || !allowed.contains(&&*k) {
            continue;
        }
        match kept.iter_mut().find(|(key, _)| *key == *k) {
            Some((_, vals)) => vals.push(v.into_owned()),
            None => kept.push((k.into_owned(), vec![v.into_owned()])),
        }
    }

    url.set_fragment(None);
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(
            kept.iter()
                .flat_map(|(k, vals)| vals.iter().map(move |v| (k.as_str(), v.as_str()))),
        );
    }
    url.into()
}
