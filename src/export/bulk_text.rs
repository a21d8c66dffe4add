//! Plain-text word import: one `word<2+ spaces or tab>meaning` pair per line.
use regex::Regex;
use std::sync::OnceLock;

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"\s{2,}|\t").expect("separator pattern is valid"))
}

/// Parses one line into `(word, meaning)`.
///
/// Returns `None` unless the line splits into exactly two non-empty parts.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    let mut parts = separator().split(line.trim());
    let word = parts.next()?.trim();
    let meaning = parts.next()?.trim();
    if parts.next().is_some() || word.is_empty() || meaning.is_empty() {
        return None;
    }
    Some((word.to_string(), meaning.to_string()))
}

/// Parses every line of `text`, silently skipping malformed ones.
pub fn parse_bulk(text: &str) -> Vec<(String, String)> {
    text.lines().filter_map(parse_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bulk_skips_malformed_lines() {
        let pairs = parse_bulk("cat  con mèo\ndog\tcon chó\nbad line");
        assert_eq!(
            pairs,
            vec![
                ("cat".to_string(), "con mèo".to_string()),
                ("dog".to_string(), "con chó".to_string()),
            ]
        );
    }

    #[test]
    fn test_single_space_is_not_a_separator() {
        assert_eq!(parse_line("look up tra cứu"), None);
        assert_eq!(
            parse_line("look up   tra cứu"),
            Some(("look up".to_string(), "tra cứu".to_string()))
        );
    }

    #[test]
    fn test_three_columns_are_rejected() {
        assert_eq!(parse_line("a  b  c"), None);
        assert_eq!(parse_line("a\tb\tc"), None);
    }

    #[test]
    fn test_surrounding_whitespace_and_blank_lines() {
        let pairs = parse_bulk("\n   apple    quả táo   \n\n\t\n");
        assert_eq!(pairs, vec![("apple".to_string(), "quả táo".to_string())]);
    }

    #[test]
    fn test_windows_line_endings() {
        let pairs = parse_bulk("one  một\r\ntwo  hai\r\n");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], ("two".to_string(), "hai".to_string()));
    }
}
