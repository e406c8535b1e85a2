/// Comparison key for category labels: invisible characters stripped, whitespace collapsed,
/// case folded. "  Unit   TESTS\u{feff}" and "unit tests" share a key.
pub(crate) fn category_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '\u{feff}' | '\u{200b}' | '\u{00ad}'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
