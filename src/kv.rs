//! Key/value row collection, shared by headers and query params

use std::collections::BTreeMap;

use crate::models::KeyValueRow;

/// Convert editable rows into a mapping.
///
/// Keys and values are trimmed, rows with an empty key are dropped and a
/// later row overwrites an earlier one with the same key.
pub fn collect_rows(rows: &[KeyValueRow]) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for row in rows {
        let key = row.key.trim();
        if key.is_empty() {
            continue;
        }
        out.insert(key.to_string(), row.value.trim().to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_duplicate_wins_and_blank_keys_dropped() {
        let rows = vec![
            KeyValueRow::new("a", "1"),
            KeyValueRow::new("a", "2"),
            KeyValueRow::new("", "x"),
        ];
        let map = collect_rows(&rows);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let rows = vec![
            KeyValueRow::new("  X-Trace ", "  abc  "),
            KeyValueRow::new("   ", "ignored"),
        ];
        let map = collect_rows(&rows);
        assert_eq!(map.get("X-Trace").map(String::as_str), Some("abc"));
        assert!(!map.contains_key(""));
    }

    #[test]
    fn test_empty_input_gives_empty_map() {
        assert!(collect_rows(&[]).is_empty());
    }
}
