// src/specs/wallpaper_table.rs
use std::sync::LazyLock;

use regex::Regex;

use crate::core::url::clean_url;
use crate::record::Record;

/// `![](https://…)` followed by an ISO date, inside one table cell.
static CELL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[\]\((https://[^)]+)\)\s*(\d{4}-\d{2}-\d{2})").expect("cell pattern compiles")
});

/// Extract every wallpaper record from a Markdown document, in line/cell order.
pub fn parse_markdown(text: &str) -> Vec<Record> {
    let mut out = Vec::new();
    for line in text.lines() {
        let Some(cells) = table_cells(line) else { continue };
        for cell in cells {
            if let Some((raw_url, date)) = match_cell(cell) {
                out.push(Record::from_clean_url(date, clean_url(raw_url)));
            }
        }
    }
    out
}

/// Inner cells of a table row. Header separators (`---`) and non-table lines give `None`.
fn table_cells(line: &str) -> Option<impl Iterator<Item = &str>> {
    let t = line.trim();
    if !t.starts_with('|') || t.contains("---") {
        return None;
    }
    let parts: Vec<&str> = t.split('|').collect();
    let inner = parts.len().saturating_sub(2);
    Some(parts.into_iter().skip(1).take(inner))
}

/// First `(raw_url, date)` pair in a cell.
pub fn match_cell(cell: &str) -> Option<(&str, &str)> {
    let caps = CELL_PATTERN.captures(cell)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
# 2025-08

|      |      |      |
| :----: | :----: | :----: |
|![](https://cn.bing.com/th?id=OHR.BabyLemur_EN-US9264861498_UHD.jpg&rf=LaDigue_UHD.jpg&pid=hp&w=384&h=216&rs=1&c=4)2025-08-01 [download 4k](https://cn.bing.com/th?id=OHR.BabyLemur_EN-US9264861498_UHD.jpg)|![](https://cn.bing.com/th?id=OHR.EdinburghFringe_EN-US5923216873_UHD.jpg&w=384) 2025-08-02|
";

    #[test]
    fn extracts_records_in_cell_order() {
        let recs = parse_markdown(TABLE);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].date, "2025-08-01");
        assert_eq!(
            recs[0].url,
            "https://cn.bing.com/th?id=OHR.BabyLemur_EN-US9264861498_UHD.jpg"
        );
        assert_eq!(recs[0].title, "OHR.BabyLemur_EN-US9264861498");
        assert_eq!(recs[1].date, "2025-08-02");
        assert_eq!(recs[1].title, "OHR.EdinburghFringe_EN-US5923216873");
    }

    #[test]
    fn ignores_non_table_and_separator_lines() {
        let text = "![](https://a.example/x.jpg)2025-01-01\n|---|![](https://a.example/y.jpg)2025-01-02|\n";
        assert!(parse_markdown(text).is_empty());
    }

    #[test]
    fn outer_pieces_are_not_cells() {
        // Text before the first and after the last pipe is dropped.
        let text = "|![](https://a.example/x.jpg)2025-01-01|![](https://a.example/y.jpg)2025-01-02";
        let recs = parse_markdown(text);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].date, "2025-01-01");
    }

    #[test]
    fn one_match_per_cell() {
        let cell = "![](https://a.example/x.jpg)2025-01-01 ![](https://a.example/y.jpg)2025-01-02";
        assert_eq!(match_cell(cell), Some(("https://a.example/x.jpg", "2025-01-01")));
        assert_eq!(parse_markdown(&format!("|{cell}|")).len(), 1);
    }

    #[test]
    fn http_links_and_missing_dates_do_not_match() {
        assert_eq!(match_cell("![](http://a.example/x.jpg)2025-01-01"), None);
        assert_eq!(match_cell("![](https://a.example/x.jpg) soon"), None);
        assert_eq!(match_cell("![alt](https://a.example/x.jpg)2025-01-01"), None);
    }
}
