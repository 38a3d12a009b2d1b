//! Hostname sanity checks (RFC 1123 rules).

use regex::Regex;
use std::sync::OnceLock;

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").unwrap()
    })
}

fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9.]+$").unwrap())
}

/// Check whether a string is a valid hostname.
///
/// At most one trailing dot is allowed. The total name is limited to 253
/// characters, each label to 1-63 characters of letters, digits and hyphens
/// with no leading or trailing hyphen. Names made up purely of digits and
/// dots (IPv4 literals) are rejected.
pub fn is_valid_hostname(hostname: &str) -> bool {
    // a single trailing dot marks the name as fully qualified; a second one
    // produces an empty label and fails below
    let name = hostname.strip_suffix('.').unwrap_or(hostname);
    if name.is_empty() || name.len() > 253 {
        return false;
    }
    if numeric_pattern().is_match(name) {
        return false;
    }
    name.split('.').all(|label| label_pattern().is_match(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_with_one_trailing_dot() {
        let hostname = format!("{}.example.com.", "a".repeat(63));
        assert!(is_valid_hostname(&hostname));
    }

    #[test]
    fn test_two_trailing_dots() {
        assert!(!is_valid_hostname("example.com.."));
    }

    #[test]
    fn test_too_long() {
        // 26 ten-character labels joined by dots: 285 characters
        let labels = vec!["a123456789"; 26];
        assert!(!is_valid_hostname(&labels.join(".")));
    }

    #[test]
    fn test_all_numeric() {
        assert!(!is_valid_hostname("127.0.0.1"));
    }

    #[test]
    fn test_label_too_long() {
        let hostname = format!("{}.example.com", "a".repeat(64));
        assert!(!is_valid_hostname(&hostname));
    }

    #[test]
    fn test_label_starts_with_dash() {
        assert!(!is_valid_hostname("-bad.example.com"));
    }

    #[test]
    fn test_label_ends_with_dash() {
        assert!(!is_valid_hostname("bad-.example.com"));
    }

    #[test]
    fn test_illegal_character() {
        assert!(!is_valid_hostname("greater>than.example.com"));
    }

    #[test]
    fn test_plain_valid_hostname() {
        assert!(is_valid_hostname("web-01.example.com"));
        assert!(is_valid_hostname("localhost"));
    }
}
