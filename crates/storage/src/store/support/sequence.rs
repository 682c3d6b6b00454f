#![forbid(unsafe_code)]

pub(in crate::store) fn format_sequence(items: &[i64]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Unparsable entries are skipped; they still count as content via [`sequence_has_content`].
pub(in crate::store) fn parse_sequence(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|item| item.trim().parse::<i64>().ok())
        .collect()
}

pub(in crate::store) fn sequence_has_content(raw: &str) -> bool {
    raw.split(',').any(|item| !item.trim().is_empty())
}
