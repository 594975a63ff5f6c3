/// Field delimiter within a structured file name.
pub const FIELD_DELIMITER: char = '-';

/// Removes a trailing extension: a dot followed by one or more characters
/// that are neither dots nor slashes, at the very end of the string.
pub fn strip_extension(raw: &str) -> &str {
    match raw.rfind('.') {
        Some(idx) if idx + 1 < raw.len() && !raw[idx + 1..].contains('/') => &raw[..idx],
        _ => raw,
    }
}

/// Splits a raw file name into normalized tokens.
///
/// The extension is stripped, the remainder split on `-`, and every segment
/// has its underscores replaced by spaces and is trimmed. Empty input yields
/// a single empty token.
pub fn tokenize(raw: &str) -> Vec<String> {
    strip_extension(raw)
        .split(FIELD_DELIMITER)
        .map(normalize_segment)
        .collect()
}

fn normalize_segment(segment: &str) -> String {
    segment.replace('_', " ").trim().to_string()
}
